use crate::{Issue, IssueField};

/// Equality filter over issues of one project.
///
/// Clause values are compared with [`Issue::field_text`], so `open=false`
/// matches closed issues and timestamps must be given in RFC 3339 form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueFilter {
    project: String,
    clauses: Vec<(IssueField, String)>,
}

impl IssueFilter {
    pub fn new<T: Into<String>>(project: T) -> Self {
        Self {
            project: project.into(),
            clauses: vec![],
        }
    }

    pub fn add_clause<T: Into<String>>(&mut self, field: IssueField, value: T) {
        self.clauses.push((field, value.into()));
    }

    pub fn with_clause<T: Into<String>>(mut self, field: IssueField, value: T) -> Self {
        self.add_clause(field, value);
        self
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn clauses(&self) -> &[(IssueField, String)] {
        &self.clauses
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        issue.project == self.project
            && self
                .clauses
                .iter()
                .all(|(field, value)| issue.field_text(*field) == *value)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::IssueFilter;
    use crate::{Issue, IssueField, IssueId};

    fn issue(project: &str, assigned_to: &str, open: bool) -> Issue {
        Issue {
            id: IssueId::generate(),
            project: project.into(),
            issue_title: "Title".into(),
            issue_text: "Text".into(),
            created_on: datetime!(2024-03-01 10:00 UTC),
            updated_on: datetime!(2024-03-01 10:00 UTC),
            created_by: "Joe".into(),
            assigned_to: assigned_to.into(),
            open,
            status_text: String::new(),
        }
    }

    #[test]
    fn project_only() {
        let filter = IssueFilter::new("apitest");

        assert!(filter.matches(&issue("apitest", "", true)));
        assert!(!filter.matches(&issue("other", "", true)));
    }

    #[test]
    fn clauses_are_conjunctive() {
        let filter = IssueFilter::new("apitest")
            .with_clause(IssueField::Open, "false")
            .with_clause(IssueField::AssignedTo, "Joe");

        assert!(filter.matches(&issue("apitest", "Joe", false)));
        assert!(!filter.matches(&issue("apitest", "Joe", true)));
        assert!(!filter.matches(&issue("apitest", "Ann", false)));
    }

    #[test]
    fn filter_by_id() {
        let target = issue("apitest", "", true);
        let filter = IssueFilter::new("apitest").with_clause(IssueField::Id, target.id.to_string());

        assert!(filter.matches(&target));
        assert!(!filter.matches(&issue("apitest", "", true)));
    }
}
