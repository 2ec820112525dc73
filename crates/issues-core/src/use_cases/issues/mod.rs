pub(crate) mod create_issue;
pub(crate) mod delete_issue;
pub(crate) mod list_issues;
pub(crate) mod update_issue;

pub use create_issue::CreateIssueInterface;
pub use delete_issue::DeleteIssueInterface;
pub use list_issues::ListIssuesInterface;
pub use update_issue::UpdateIssueInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    create_issue::MockCreateIssueInterface, delete_issue::MockDeleteIssueInterface,
    list_issues::MockListIssuesInterface, update_issue::MockUpdateIssueInterface,
};
