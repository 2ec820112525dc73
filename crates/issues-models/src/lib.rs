mod issue;
mod issue_field;
mod issue_filter;
mod issue_id;
mod issue_patch;
mod request_fields;

pub use issue::{current_timestamp, Issue, NewIssue};
pub use issue_field::{IssueField, IssueFieldError};
pub use issue_filter::IssueFilter;
pub use issue_id::{IssueId, IssueIdError};
pub use issue_patch::{IssuePatch, PatchValue, PatchValueError};
pub use request_fields::{RawValue, RequestFields};
