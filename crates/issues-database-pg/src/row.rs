use issues_models::{Issue, IssueId};
use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

pub(crate) struct IssueRow(Issue);

impl From<IssueRow> for Issue {
    fn from(r: IssueRow) -> Self {
        r.0
    }
}

impl<'r> FromRow<'r, PgRow> for IssueRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(Issue {
            id: IssueId::from(row.try_get::<Uuid, _>("id")?),
            project: row.try_get("project")?,
            issue_title: row.try_get("issue_title")?,
            issue_text: row.try_get("issue_text")?,
            created_on: row.try_get("created_on")?,
            updated_on: row.try_get("updated_on")?,
            created_by: row.try_get("created_by")?,
            assigned_to: row.try_get("assigned_to")?,
            open: row.try_get("open")?,
            status_text: row.try_get("status_text")?,
        }))
    }
}
