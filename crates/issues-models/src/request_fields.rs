//! Raw request fields and the presence rule.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One scalar value as sent by a client.
///
/// Query strings and form bodies only ever produce [`RawValue::Text`];
/// JSON bodies may carry the other variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
}

impl RawValue {
    /// A value is present unless it is falsy: `null`, `false`, `0` or `""`.
    ///
    /// The string `"false"` is not falsy.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Flag(value) => *value,
            Self::Number(value) => value.as_f64().map_or(true, |n| n != 0.0),
            Self::Text(value) => !value.is_empty(),
        }
    }

    /// Text form of the value, as a string field would store it.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Flag(value) => value.to_string(),
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Named fields of one request source (query string or body).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestFields(BTreeMap<String, RawValue>);

impl RequestFields {
    pub fn new() -> Self {
        Default::default()
    }

    /// Build fields from text pairs, as decoded from a query string or a form.
    pub fn from_text_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), RawValue::Text(v.into())))
            .collect()
    }

    pub fn insert<K: Into<String>, V: Into<RawValue>>(&mut self, name: K, value: V) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with<K: Into<String>, V: Into<RawValue>>(mut self, name: K, value: V) -> Self {
        self.insert(name, value);
        self
    }

    /// Value of a field, only if it is present.
    pub fn present(&self, name: &str) -> Option<&RawValue> {
        self.0.get(name).filter(|v| v.is_present())
    }

    /// Text of a field, only if it is present.
    pub fn present_text(&self, name: &str) -> Option<String> {
        self.present(name).map(RawValue::to_text)
    }

    /// Every present field, in name order.
    pub fn present_fields(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.0
            .iter()
            .filter(|(_, v)| v.is_present())
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RawValue)> for RequestFields {
    fn from_iter<T: IntoIterator<Item = (K, RawValue)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{RawValue, RequestFields};

    #[test]
    fn falsy_values_are_absent() {
        assert!(!RawValue::Null.is_present());
        assert!(!RawValue::Flag(false).is_present());
        assert!(!RawValue::Number(0.into()).is_present());
        assert!(!RawValue::Text(String::new()).is_present());
    }

    #[test]
    fn false_string_is_present() {
        assert!(RawValue::from("false").is_present());
        assert!(RawValue::from("0").is_present());
        assert!(RawValue::Flag(true).is_present());
        assert!(RawValue::Number(3.into()).is_present());
    }

    #[test]
    fn deserialize_json_body() {
        let fields: RequestFields = serde_json::from_str(
            r#"{"_id": "abc", "open": false, "issue_title": "", "count": 2, "assigned_to": null}"#,
        )
        .unwrap();

        let present: Vec<_> = fields.present_fields().map(|(k, _)| k).collect();
        assert_eq!(present, vec!["_id", "count"]);
        assert_eq!(fields.present_text("count"), Some("2".into()));
    }

    #[test]
    fn reject_nested_json_values() {
        assert!(serde_json::from_str::<RequestFields>(r#"{"issue_title": ["a"]}"#).is_err());
    }

    #[test]
    fn text_pairs_are_text() {
        let fields = RequestFields::from_text_pairs([("open", "false"), ("status_text", "")]);

        assert_eq!(fields.present("open"), Some(&RawValue::from("false")));
        assert_eq!(fields.present("status_text"), None);
        assert_eq!(fields.present("missing"), None);
    }
}
