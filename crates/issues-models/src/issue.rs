use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::{IssueField, IssueId, IssuePatch, PatchValueError};

/// Tracked issue, as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: IssueId,
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_on: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_on: OffsetDateTime,
    pub created_by: String,
    pub assigned_to: String,
    pub open: bool,
    pub status_text: String,
}

/// Issue waiting for the store to assign its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_on: OffsetDateTime,
    pub updated_on: OffsetDateTime,
    pub created_by: String,
    pub assigned_to: String,
    pub open: bool,
    pub status_text: String,
}

impl NewIssue {
    pub fn into_issue(self, id: IssueId) -> Issue {
        Issue {
            id,
            project: self.project,
            issue_title: self.issue_title,
            issue_text: self.issue_text,
            created_on: self.created_on,
            updated_on: self.updated_on,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            open: self.open,
            status_text: self.status_text,
        }
    }
}

impl Issue {
    /// Canonical text of a field, used for equality filters.
    pub fn field_text(&self, field: IssueField) -> String {
        match field {
            IssueField::Id => self.id.to_string(),
            IssueField::Project => self.project.clone(),
            IssueField::IssueTitle => self.issue_title.clone(),
            IssueField::IssueText => self.issue_text.clone(),
            IssueField::CreatedOn => format_timestamp(self.created_on),
            IssueField::UpdatedOn => format_timestamp(self.updated_on),
            IssueField::CreatedBy => self.created_by.clone(),
            IssueField::AssignedTo => self.assigned_to.clone(),
            IssueField::Open => self.open.to_string(),
            IssueField::StatusText => self.status_text.clone(),
        }
    }

    /// Apply a patch, all or nothing.
    pub fn apply_patch(&mut self, patch: &IssuePatch) -> Result<(), PatchValueError> {
        let mut updated = self.clone();

        for (field, value) in patch.values() {
            match field {
                IssueField::IssueTitle => updated.issue_title = value.to_text(),
                IssueField::IssueText => updated.issue_text = value.to_text(),
                IssueField::CreatedBy => updated.created_by = value.to_text(),
                IssueField::AssignedTo => updated.assigned_to = value.to_text(),
                IssueField::StatusText => updated.status_text = value.to_text(),
                IssueField::Open => updated.open = value.to_flag()?,
                IssueField::Id
                | IssueField::Project
                | IssueField::CreatedOn
                | IssueField::UpdatedOn => (),
            }
        }

        updated.updated_on = patch.updated_on();
        *self = updated;
        Ok(())
    }
}

/// Current UTC time, truncated to the millisecond.
pub fn current_timestamp() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_millisecond(now.millisecond()).unwrap_or(now)
}

fn format_timestamp(value: OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_else(|_| value.to_string())
}
