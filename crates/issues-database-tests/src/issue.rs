use issues_database_interface::DatabaseError;
use issues_models::{current_timestamp, IssueField, IssueFilter, IssuePatch, NewIssue, PatchValue};
use pretty_assertions::assert_eq;
use time::Duration;

use crate::testcase::db_test_case;

fn new_issue(project: &str, title: &str, assigned_to: &str) -> NewIssue {
    let now = current_timestamp();

    NewIssue {
        project: project.into(),
        issue_title: title.into(),
        issue_text: "Some text".into(),
        created_on: now,
        updated_on: now,
        created_by: "Joe".into(),
        assigned_to: assigned_to.into(),
        open: true,
        status_text: String::new(),
    }
}

#[tokio::test]
async fn create() {
    db_test_case("issue_create", |db| async move {
        let first = db.issues_create(new_issue("apitest", "First", "")).await?;
        let second = db.issues_create(new_issue("apitest", "First", "")).await?;

        assert_ne!(first.id, second.id);
        assert_eq!(first.project, "apitest");
        assert_eq!(first.issue_title, "First");
        assert_eq!(first.created_on, first.updated_on);
        assert!(first.open);

        assert_eq!(db.issues_get(&first.id.to_string()).await?, Some(first));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get_unknown_or_malformed() {
    db_test_case("issue_get_unknown", |db| async move {
        assert_eq!(
            db.issues_get("67e55044-10b1-426f-9247-bb680e5fe0c8").await?,
            None
        );
        assert_eq!(db.issues_get("not-an-id").await?, None);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn find() {
    db_test_case("issue_find", |db| async move {
        let first = db.issues_create(new_issue("apitest", "First", "Joe")).await?;
        let second = db.issues_create(new_issue("apitest", "Second", "Ann")).await?;
        db.issues_create(new_issue("other", "Third", "Joe")).await?;

        assert_eq!(
            db.issues_find(&IssueFilter::new("apitest")).await?,
            vec![first.clone(), second.clone()]
        );
        assert_eq!(
            db.issues_find(&IssueFilter::new("apitest").with_clause(IssueField::AssignedTo, "Joe"))
                .await?,
            vec![first.clone()]
        );
        assert_eq!(db.issues_find(&IssueFilter::new("nothing")).await?, vec![]);

        db.issues_update(
            &second.id.to_string(),
            IssuePatch::new(vec![(IssueField::Open, PatchValue::Flag(false))], second.updated_on),
        )
        .await?;
        let closed = db
            .issues_find(&IssueFilter::new("apitest").with_clause(IssueField::Open, "false"))
            .await?;
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].id, second.id);

        let filter = IssueFilter::new("apitest")
            .with_clause(IssueField::Open, "true")
            .with_clause(IssueField::IssueTitle, "First")
            .with_clause(IssueField::Id, first.id.to_string());
        assert_eq!(db.issues_find(&filter).await?, vec![first]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn update() {
    db_test_case("issue_update", |db| async move {
        let issue = db.issues_create(new_issue("apitest", "First", "")).await?;
        let stamp = issue.created_on + Duration::seconds(5);

        let updated = db
            .issues_update(
                &issue.id.to_string(),
                IssuePatch::new(
                    vec![
                        (IssueField::StatusText, PatchValue::Text("In QA".into())),
                        (IssueField::Open, PatchValue::Flag(false)),
                    ],
                    stamp,
                ),
            )
            .await?;
        assert!(updated);

        let stored = db.issues_get(&issue.id.to_string()).await?.unwrap();
        assert_eq!(stored.status_text, "In QA");
        assert!(!stored.open);
        assert_eq!(stored.updated_on, stamp);
        assert_eq!(stored.created_on, issue.created_on);
        assert_eq!(stored.issue_title, "First");

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn update_casts_open_text() {
    db_test_case("issue_update_open_text", |db| async move {
        let issue = db.issues_create(new_issue("apitest", "First", "")).await?;
        let id = issue.id.to_string();

        db.issues_update(
            &id,
            IssuePatch::new(
                vec![(IssueField::Open, PatchValue::Flag(false))],
                current_timestamp(),
            ),
        )
        .await?;
        db.issues_update(
            &id,
            IssuePatch::new(
                vec![(IssueField::Open, PatchValue::Text("true".into()))],
                current_timestamp(),
            ),
        )
        .await?;
        assert!(db.issues_get(&id).await?.unwrap().open);

        assert!(matches!(
            db.issues_update(
                &id,
                IssuePatch::new(
                    vec![
                        (IssueField::IssueTitle, PatchValue::Text("Changed".into())),
                        (IssueField::Open, PatchValue::Text("closed".into()))
                    ],
                    current_timestamp(),
                ),
            )
            .await,
            Err(DatabaseError::InvalidFieldValue { .. })
        ));
        assert_eq!(db.issues_get(&id).await?.unwrap().issue_title, "First");

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn update_unknown_or_malformed() {
    db_test_case("issue_update_unknown", |db| async move {
        let patch = IssuePatch::new(
            vec![(IssueField::StatusText, PatchValue::Text("x".into()))],
            current_timestamp(),
        );

        assert!(
            !db.issues_update("67e55044-10b1-426f-9247-bb680e5fe0c8", patch.clone())
                .await?
        );
        assert!(!db.issues_update("5f665eb46e296f6b9b6a504d", patch).await?);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn delete() {
    db_test_case("issue_delete", |db| async move {
        let first = db.issues_create(new_issue("apitest", "First", "")).await?;
        let second = db.issues_create(new_issue("apitest", "Second", "")).await?;

        assert_eq!(db.issues_delete(&first.id.to_string()).await?, 1);
        assert_eq!(db.issues_delete(&first.id.to_string()).await?, 0);
        assert_eq!(db.issues_delete("not-an-id").await?, 0);

        assert_eq!(
            db.issues_find(&IssueFilter::new("apitest")).await?,
            vec![second]
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn health_check() {
    db_test_case("issue_health_check", |db| async move {
        db.health_check().await?;
        Ok(())
    })
    .await;
}
