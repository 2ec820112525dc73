use async_trait::async_trait;
use issues_database_interface::{DatabaseError, DbService, Result};
use issues_models::{Issue, IssueField, IssueFilter, IssueId, IssuePatch, NewIssue};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::row::IssueRow;

pub struct PostgresDb {
    pool: PgPool,
}

impl PostgresDb {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn wrap_error(e: sqlx::Error) -> DatabaseError {
        DatabaseError::ImplementationError { source: e.into() }
    }

    /// Columns whose text form equals the issue field text.
    fn filter_column(field: IssueField) -> Option<&'static str> {
        match field {
            IssueField::Project => Some("project"),
            IssueField::IssueTitle => Some("issue_title"),
            IssueField::IssueText => Some("issue_text"),
            IssueField::CreatedBy => Some("created_by"),
            IssueField::AssignedTo => Some("assigned_to"),
            IssueField::Open => Some("\"open\"::text"),
            IssueField::StatusText => Some("status_text"),
            IssueField::Id | IssueField::CreatedOn | IssueField::UpdatedOn => None,
        }
    }

    fn patch_column(field: IssueField) -> Option<&'static str> {
        match field {
            IssueField::IssueTitle => Some("issue_title"),
            IssueField::IssueText => Some("issue_text"),
            IssueField::CreatedBy => Some("created_by"),
            IssueField::AssignedTo => Some("assigned_to"),
            IssueField::Open => Some("\"open\""),
            IssueField::StatusText => Some("status_text"),
            IssueField::Id
            | IssueField::Project
            | IssueField::CreatedOn
            | IssueField::UpdatedOn => None,
        }
    }
}

#[async_trait]
impl DbService for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn issues_find(&self, filter: &IssueFilter) -> Result<Vec<Issue>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM issue WHERE project = ");
        builder.push_bind(filter.project());

        for (field, value) in filter.clauses() {
            let Some(column) = Self::filter_column(*field) else {
                continue;
            };

            builder.push(" AND ").push(column).push(" = ").push_bind(value.clone());
        }

        builder.push(" ORDER BY seq");

        let rows = builder
            .build_query_as::<IssueRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(Self::wrap_error)?;

        // Identifier and timestamp clauses compare canonical text on decoded rows.
        Ok(rows
            .into_iter()
            .map(Issue::from)
            .filter(|i| filter.matches(i))
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn issues_create(&self, instance: NewIssue) -> Result<Issue> {
        let issue = instance.into_issue(IssueId::generate());

        sqlx::query_as::<_, IssueRow>(
            r#"
            INSERT INTO issue
            (
                id,
                project,
                issue_title,
                issue_text,
                created_on,
                updated_on,
                created_by,
                assigned_to,
                "open",
                status_text
            )
            VALUES
            (
                $1,
                $2,
                $3,
                $4,
                $5,
                $6,
                $7,
                $8,
                $9,
                $10
            )
            RETURNING *
            ;
        "#,
        )
        .bind(*issue.id.as_uuid())
        .bind(issue.project)
        .bind(issue.issue_title)
        .bind(issue.issue_text)
        .bind(issue.created_on)
        .bind(issue.updated_on)
        .bind(issue.created_by)
        .bind(issue.assigned_to)
        .bind(issue.open)
        .bind(issue.status_text)
        .fetch_one(&self.pool)
        .await
        .map(Into::into)
        .map_err(Self::wrap_error)
    }

    #[tracing::instrument(skip(self))]
    async fn issues_get(&self, id: &str) -> Result<Option<Issue>> {
        let Ok(id) = IssueId::try_from(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, IssueRow>(
            r#"
                SELECT *
                FROM issue
                WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn issues_update(&self, id: &str, patch: IssuePatch) -> Result<bool> {
        let Ok(id) = IssueId::try_from(id) else {
            return Ok(false);
        };

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE issue SET updated_on = ");
        builder.push_bind(patch.updated_on());

        for (field, value) in patch.values() {
            let Some(column) = Self::patch_column(*field) else {
                continue;
            };

            builder.push(", ").push(column).push(" = ");
            if *field == IssueField::Open {
                builder.push_bind(value.to_flag()?);
            } else {
                builder.push_bind(value.to_text());
            }
        }

        builder.push(" WHERE id = ").push_bind(*id.as_uuid());

        builder
            .build()
            .execute(&self.pool)
            .await
            .map(|x| x.rows_affected() > 0)
            .map_err(Self::wrap_error)
    }

    #[tracing::instrument(skip(self))]
    async fn issues_delete(&self, id: &str) -> Result<u64> {
        let Ok(id) = IssueId::try_from(id) else {
            return Ok(0);
        };

        sqlx::query(
            r#"
            DELETE FROM issue
            WHERE id = $1
        "#,
        )
        .bind(*id.as_uuid())
        .execute(&self.pool)
        .await
        .map(|x| x.rows_affected())
        .map_err(Self::wrap_error)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1;")
            .execute(&self.pool)
            .await
            .map_err(Self::wrap_error)?;

        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use issues_models::IssueField;

    use super::PostgresDb;

    #[test]
    fn only_patchable_fields_have_columns() {
        for field in IssueField::ALL {
            assert_eq!(
                PostgresDb::patch_column(field).is_some(),
                field.is_patchable(),
                "{field}"
            );
        }
    }
}
