//! Request field extraction.

use actix_web::{web, HttpMessage, HttpRequest};
use issues_models::RequestFields;

use crate::{Result, ServerError};

fn parse_text_pairs(input: &str) -> Result<RequestFields> {
    web::Query::<Vec<(String, String)>>::from_query(input)
        .map(|pairs| RequestFields::from_text_pairs(pairs.into_inner()))
        .map_err(|e| ServerError::InvalidBody {
            message: e.to_string(),
        })
}

fn is_json(content_type: &str) -> bool {
    content_type == "application/json" || content_type.ends_with("+json")
}

/// Fields of the query string.
pub(crate) fn query_fields(req: &HttpRequest) -> Result<RequestFields> {
    parse_text_pairs(req.query_string())
}

/// Fields of the request body.
///
/// JSON bodies are only read as such when declared; anything else is
/// decoded as a form. A blank body carries no field.
pub(crate) fn body_fields(req: &HttpRequest, body: &[u8]) -> Result<RequestFields> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RequestFields::new());
    }

    if is_json(req.content_type()) {
        serde_json::from_slice(body).map_err(|e| ServerError::InvalidBody {
            message: e.to_string(),
        })
    } else {
        let text = std::str::from_utf8(body).map_err(|e| ServerError::InvalidBody {
            message: e.to_string(),
        })?;

        parse_text_pairs(text)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use issues_models::RawValue;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn json_body() {
        let req = TestRequest::default()
            .insert_header(("Content-Type", "application/json"))
            .to_http_request();
        let fields = body_fields(&req, br#"{"_id": "abc", "open": false}"#).unwrap();

        assert_eq!(fields.present_text("_id"), Some("abc".into()));
        assert_eq!(fields.present("open"), None);
    }

    #[test]
    fn form_body() {
        let req = TestRequest::default()
            .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
            .to_http_request();
        let fields = body_fields(&req, b"issue_title=Hello+world&open=false").unwrap();

        assert_eq!(fields.present_text("issue_title"), Some("Hello world".into()));
        assert_eq!(fields.present("open"), Some(&RawValue::from("false")));
    }

    #[test]
    fn blank_body() {
        let req = TestRequest::default()
            .insert_header(("Content-Type", "application/json"))
            .to_http_request();

        assert!(body_fields(&req, b"  \n").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_body() {
        let req = TestRequest::default()
            .insert_header(("Content-Type", "application/json"))
            .to_http_request();

        assert!(matches!(
            body_fields(&req, b"{\"issue_title\":"),
            Err(ServerError::InvalidBody { .. })
        ));
    }

    #[test]
    fn query_string() {
        let req = TestRequest::with_uri("/api/issues/apitest?open=false&assigned_to=Joe")
            .to_http_request();
        let fields = query_fields(&req).unwrap();

        assert_eq!(fields.present_text("open"), Some("false".into()));
        assert_eq!(fields.present_text("assigned_to"), Some("Joe".into()));
    }
}
