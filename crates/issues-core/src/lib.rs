//! Issue request handling.

#![warn(clippy::all)]

mod context;
pub mod errors;
pub mod use_cases;

pub use context::CoreContext;
pub use errors::{DomainError, Result};
use shaku::module;
use use_cases::issues::{
    create_issue::CreateIssue, delete_issue::DeleteIssue, list_issues::ListIssues,
    update_issue::UpdateIssue,
};

module! {
    pub CoreModule {
        components = [
            ListIssues, CreateIssue, UpdateIssue, DeleteIssue
        ],
        providers = []
    }
}
