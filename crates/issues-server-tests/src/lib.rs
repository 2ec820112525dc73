#![cfg(test)]

use std::time::Duration;

use actix_http::{Request, StatusCode};
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::header::CONTENT_TYPE,
    test::{self, TestRequest},
    web::Data,
};
use issues_config::Config;
use issues_core::{
    use_cases::issues::{ListIssuesInterface, MockListIssuesInterface},
    CoreModule, DomainError,
};
use issues_database_interface::{DatabaseError, DbService, MockDbService};
use issues_database_memory::MemoryDb;
use issues_database_tests::db_test_case;
use issues_server::{
    metrics::build_metrics_handler,
    server::{build_actix_app, AppContext},
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn build_context(core_module: CoreModule, db_service: Box<dyn DbService>) -> Data<AppContext> {
    let config = Config::from_env_no_version().unwrap();

    Data::new(AppContext::new(config, core_module, db_service))
}

async fn call<S, B>(app: &S, req: TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, req.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;

    (status, serde_json::from_slice(&body).unwrap())
}

async fn create<S, B>(app: &S, project: &str, body: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, issue) = call(
        app,
        TestRequest::post()
            .uri(&format!("/api/issues/{project}"))
            .set_json(body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    issue
}

fn sample_issue(title: &str) -> Value {
    json!({
        "issue_title": title,
        "issue_text": "Some text",
        "created_by": "Joe"
    })
}

fn titles(issues: &Value) -> Vec<&str> {
    issues
        .as_array()
        .unwrap()
        .iter()
        .map(|issue| issue["issue_title"].as_str().unwrap())
        .collect()
}

#[actix_web::test]
async fn index() {
    let ctx = build_context(CoreModule::builder().build(), Box::new(MockDbService::new()));
    let app = test::init_service(build_actix_app(ctx, build_metrics_handler().unwrap())).await;

    let (status, body) = call(&app, TestRequest::get().uri("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Welcome on the issue tracker!"}));
}

#[actix_web::test]
async fn create_with_every_field() {
    db_test_case("server_create_every_field", |db_service| async move {
        let ctx = build_context(CoreModule::builder().build(), db_service);
        let app = test::init_service(build_actix_app(ctx, build_metrics_handler()?)).await;

        let issue = create(
            &app,
            "apitest",
            json!({
                "issue_title": "Title",
                "issue_text": "Text",
                "created_by": "Joe",
                "assigned_to": "Ann",
                "status_text": "In QA",
                "open": false,
                "unknown": "ignored"
            }),
        )
        .await;

        let object = issue.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "_id",
                "assigned_to",
                "created_by",
                "created_on",
                "issue_text",
                "issue_title",
                "open",
                "project",
                "status_text",
                "updated_on"
            ]
        );
        assert_eq!(issue["project"], "apitest");
        assert_eq!(issue["issue_title"], "Title");
        assert_eq!(issue["assigned_to"], "Ann");
        assert_eq!(issue["status_text"], "In QA");
        assert_eq!(issue["open"], true);
        assert_eq!(issue["created_on"], issue["updated_on"]);

        Ok(())
    })
    .await;
}

#[actix_web::test]
async fn create_with_required_fields() {
    db_test_case("server_create_required_fields", |db_service| async move {
        let ctx = build_context(CoreModule::builder().build(), db_service);
        let app = test::init_service(build_actix_app(ctx, build_metrics_handler()?)).await;

        let issue = create(&app, "apitest", sample_issue("Title")).await;

        assert_eq!(issue["assigned_to"], "");
        assert_eq!(issue["status_text"], "");
        assert_eq!(issue["open"], true);

        Ok(())
    })
    .await;
}

#[actix_web::test]
async fn create_missing_required_fields() {
    db_test_case("server_create_missing_fields", |db_service| async move {
        let ctx = build_context(CoreModule::builder().build(), db_service);
        let app = test::init_service(build_actix_app(ctx, build_metrics_handler()?)).await;

        let (status, body) = call(
            &app,
            TestRequest::post()
                .uri("/api/issues/apitest")
                .set_json(json!({"issue_title": "Title", "issue_text": "", "created_by": "Joe"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": "required field(s) missing"}));

        let (_, issues) = call(&app, TestRequest::get().uri("/api/issues/apitest")).await;
        assert_eq!(issues, json!([]));

        Ok(())
    })
    .await;
}

#[actix_web::test]
async fn create_from_form_and_query() {
    let ctx = build_context(CoreModule::builder().build(), Box::new(MemoryDb::new()));
    let app = test::init_service(build_actix_app(ctx, build_metrics_handler().unwrap())).await;

    let (status, issue) = call(
        &app,
        TestRequest::post()
            .uri("/api/issues/apitest?issue_text=From+query&created_by=Joe&assigned_to=Ann")
            .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload("issue_title=From+form&status_text="),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(issue["issue_title"], "From form");
    assert_eq!(issue["issue_text"], "From query");
    assert_eq!(issue["created_by"], "Joe");
    assert_eq!(issue["assigned_to"], "");
    assert_eq!(issue["status_text"], "");
}

#[actix_web::test]
async fn create_in_default_project() {
    let ctx = build_context(CoreModule::builder().build(), Box::new(MemoryDb::new()));
    let default_project = ctx.config.default_project.clone();
    let app = test::init_service(build_actix_app(ctx, build_metrics_handler().unwrap())).await;

    let (status, issue) = call(
        &app,
        TestRequest::post()
            .uri("/api/issues")
            .set_json(sample_issue("Title")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(issue["project"], default_project);
}

#[actix_web::test]
async fn list() {
    db_test_case("server_list", |db_service| async move {
        let ctx = build_context(CoreModule::builder().build(), db_service);
        let app = test::init_service(build_actix_app(ctx, build_metrics_handler()?)).await;

        let first = create(
            &app,
            "apitest",
            json!({
                "issue_title": "First",
                "issue_text": "Text",
                "created_by": "Joe",
                "assigned_to": "Joe"
            }),
        )
        .await;
        let second = create(&app, "apitest", sample_issue("Second")).await;
        create(&app, "other", sample_issue("Third")).await;

        call(
            &app,
            TestRequest::put()
                .uri("/api/issues/apitest")
                .set_json(json!({"_id": second["_id"], "open": false})),
        )
        .await;

        let (status, issues) = call(&app, TestRequest::get().uri("/api/issues/apitest")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&issues), vec!["First", "Second"]);
        assert_eq!(issues[0], first);

        let (_, issues) = call(
            &app,
            TestRequest::get().uri("/api/issues/apitest?open=false"),
        )
        .await;
        assert_eq!(titles(&issues), vec!["Second"]);

        let (_, issues) = call(
            &app,
            TestRequest::get().uri("/api/issues/apitest?open=true&assigned_to=Joe&created_by="),
        )
        .await;
        assert_eq!(titles(&issues), vec!["First"]);

        let (_, issues) = call(
            &app,
            TestRequest::get().uri("/api/issues/apitest?project=other&sort=desc"),
        )
        .await;
        assert_eq!(titles(&issues), vec!["First", "Second"]);

        let (status, issues) = call(&app, TestRequest::get().uri("/api/issues/unknown")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(issues, json!([]));

        Ok(())
    })
    .await;
}

#[actix_web::test]
async fn update() {
    db_test_case("server_update", |db_service| async move {
        let ctx = build_context(CoreModule::builder().build(), db_service);
        let app = test::init_service(build_actix_app(ctx, build_metrics_handler()?)).await;

        let issue = create(&app, "apitest", sample_issue("Title")).await;
        let id = issue["_id"].as_str().unwrap().to_string();
        actix_web::rt::time::sleep(Duration::from_millis(5)).await;

        let (status, body) = call(
            &app,
            TestRequest::put()
                .uri("/api/issues/apitest")
                .set_json(json!({"_id": id, "status_text": "In QA"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"result": "successfully updated", "_id": id}));

        let (_, body) = call(
            &app,
            TestRequest::put()
                .uri("/api/issues/apitest")
                .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
                .set_payload(format!("_id={id}&assigned_to=Ann&open=false&project=other")),
        )
        .await;
        assert_eq!(body, json!({"result": "successfully updated", "_id": id}));

        let (_, body) = call(
            &app,
            TestRequest::put()
                .uri("/api/issues/apitest")
                .set_json(json!({"_id": id, "created_on": "2020-01-01T00:00:00Z"})),
        )
        .await;
        assert_eq!(body, json!({"result": "successfully updated", "_id": id}));

        let (_, issues) = call(&app, TestRequest::get().uri("/api/issues/apitest")).await;
        let stored = &issues[0];
        assert_eq!(stored["_id"], id);
        assert_eq!(stored["status_text"], "In QA");
        assert_eq!(stored["assigned_to"], "Ann");
        assert_eq!(stored["open"], false);
        assert_eq!(stored["issue_title"], "Title");
        assert_eq!(stored["created_on"], issue["created_on"]);
        assert_ne!(stored["updated_on"], issue["updated_on"]);

        Ok(())
    })
    .await;
}

#[actix_web::test]
async fn update_rejections() {
    db_test_case("server_update_rejections", |db_service| async move {
        let ctx = build_context(CoreModule::builder().build(), db_service);
        let app = test::init_service(build_actix_app(ctx, build_metrics_handler()?)).await;

        let issue = create(&app, "apitest", sample_issue("Title")).await;
        let id = issue["_id"].as_str().unwrap().to_string();

        let (status, body) = call(
            &app,
            TestRequest::put()
                .uri("/api/issues/apitest")
                .set_json(json!({"issue_title": "Changed"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": "missing _id"}));

        let (_, body) = call(
            &app,
            TestRequest::put()
                .uri("/api/issues/apitest")
                .set_json(json!({"_id": id, "issue_title": "", "project": "other"})),
        )
        .await;
        assert_eq!(body, json!({"error": "no update field(s) sent", "_id": id}));

        for unknown_id in ["5f665eb46e296f6b9b6a504d", "67e55044-10b1-426f-9247-bb680e5fe0c8"] {
            let (_, body) = call(
                &app,
                TestRequest::put()
                    .uri("/api/issues/apitest")
                    .set_json(json!({"_id": unknown_id, "issue_text": "New text"})),
            )
            .await;
            assert_eq!(body, json!({"error": "could not update", "_id": unknown_id}));
        }

        let (_, issues) = call(&app, TestRequest::get().uri("/api/issues/apitest")).await;
        assert_eq!(issues, json!([issue]));

        Ok(())
    })
    .await;
}

#[actix_web::test]
async fn delete() {
    db_test_case("server_delete", |db_service| async move {
        let ctx = build_context(CoreModule::builder().build(), db_service);
        let app = test::init_service(build_actix_app(ctx, build_metrics_handler()?)).await;

        let issue = create(&app, "apitest", sample_issue("Title")).await;
        let id = issue["_id"].as_str().unwrap().to_string();

        let (status, body) = call(
            &app,
            TestRequest::delete()
                .uri("/api/issues/apitest")
                .set_json(json!({"_id": id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"result": "successfully deleted", "_id": id}));

        let (_, body) = call(
            &app,
            TestRequest::delete()
                .uri("/api/issues/apitest")
                .set_json(json!({"_id": id})),
        )
        .await;
        assert_eq!(body, json!({"error": "could not delete", "_id": id}));

        let (_, body) = call(
            &app,
            TestRequest::delete()
                .uri("/api/issues/apitest")
                .set_json(json!({})),
        )
        .await;
        assert_eq!(body, json!({"error": "missing _id"}));

        let (_, issues) = call(&app, TestRequest::get().uri("/api/issues/apitest")).await;
        assert_eq!(issues, json!([]));

        Ok(())
    })
    .await;
}

#[actix_web::test]
async fn malformed_body() {
    let mut db_service = MockDbService::new();
    db_service.expect_issues_create().never();

    let ctx = build_context(CoreModule::builder().build(), Box::new(db_service));
    let app = test::init_service(build_actix_app(ctx, build_metrics_handler().unwrap())).await;

    let (status, body) = call(
        &app,
        TestRequest::post()
            .uri("/api/issues/apitest")
            .insert_header((CONTENT_TYPE, "application/json"))
            .set_payload(r#"{"issue_title": "#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn store_failure() {
    let mut list_issues = MockListIssuesInterface::new();
    list_issues.expect_run().return_once(|_, _, _| {
        Err(DomainError::DatabaseError {
            source: DatabaseError::ImplementationError {
                source: "connection lost".into(),
            },
        })
    });

    let core_module = CoreModule::builder()
        .with_component_override::<dyn ListIssuesInterface>(Box::new(list_issues))
        .build();
    let ctx = build_context(core_module, Box::new(MockDbService::new()));
    let app = test::init_service(build_actix_app(ctx, build_metrics_handler().unwrap())).await;

    let (status, body) = call(&app, TestRequest::get().uri("/api/issues/apitest")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "internal server error"}));
}

#[actix_web::test]
async fn health() {
    let mut db_service = MockDbService::new();
    db_service.expect_health_check().once().returning(|| Ok(()));
    let ctx = build_context(CoreModule::builder().build(), Box::new(db_service));
    let app = test::init_service(build_actix_app(ctx, build_metrics_handler().unwrap())).await;

    let (status, body) = call(&app, TestRequest::get().uri("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"database": true}));

    let mut db_service = MockDbService::new();
    db_service.expect_health_check().once().returning(|| {
        Err(DatabaseError::ImplementationError {
            source: "connection refused".into(),
        })
    });
    let ctx = build_context(CoreModule::builder().build(), Box::new(db_service));
    let app = test::init_service(build_actix_app(ctx, build_metrics_handler().unwrap())).await;

    let (status, body) = call(&app, TestRequest::get().uri("/health")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"database": false}));
}

#[actix_web::test]
async fn metrics() {
    let mut db_service = MockDbService::new();
    db_service
        .expect_issues_find()
        .once()
        .returning(|_| Ok(vec![]));
    let ctx = build_context(CoreModule::builder().build(), Box::new(db_service));
    let app = test::init_service(build_actix_app(ctx, build_metrics_handler().unwrap())).await;

    call(&app, TestRequest::get().uri("/api/issues/apitest")).await;

    let response = test::call_service(&app, TestRequest::get().uri("/metrics").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = test::read_body(response).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains(r#"issue_operations{operation="list",outcome="success"}"#));
}
