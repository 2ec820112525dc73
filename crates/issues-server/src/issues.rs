//! Issue handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use issues_core::{
    use_cases::issues::{
        CreateIssueInterface, DeleteIssueInterface, ListIssuesInterface, UpdateIssueInterface,
    },
    DomainError,
};
use shaku::HasComponent;

use crate::{
    fields::{body_fields, query_fields},
    metrics::{record_operation, Outcome},
    server::AppContext,
    Result,
};

/// Render a use case outcome, turning rejections into `{error, _id?}`.
fn respond<T>(
    operation: &str,
    result: issues_core::Result<T>,
    on_success: impl FnOnce(T) -> HttpResponse,
) -> Result<HttpResponse> {
    match result {
        Ok(value) => {
            record_operation(operation, Outcome::Success);
            Ok(on_success(value))
        }
        Err(e) if e.is_rejection() => {
            record_operation(operation, Outcome::Rejected);
            Ok(rejection_response(&e))
        }
        Err(e) => {
            record_operation(operation, Outcome::Failed);
            Err(e.into())
        }
    }
}

/// JSON body of a rejected request: `{error, _id?}`.
pub fn rejection_body(error: &DomainError) -> serde_json::Value {
    let mut body = serde_json::json!({ "error": error.to_string() });
    if let Some(id) = error.issue_id() {
        body["_id"] = id.into();
    }

    body
}

fn rejection_response(error: &DomainError) -> HttpResponse {
    HttpResponse::Ok().json(rejection_body(error))
}

#[tracing::instrument(skip_all, fields(project = %project))]
pub(crate) async fn list_issues(
    ctx: web::Data<AppContext>,
    project: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let query = query_fields(&req)?;

    let list_issues: &dyn ListIssuesInterface = ctx.core_module.resolve_ref();
    let result = list_issues
        .run(&ctx.as_core_context(), &project, &query)
        .await;

    respond("list", result, |issues| HttpResponse::Ok().json(issues))
}

async fn create_issue_in(
    ctx: &AppContext,
    project: &str,
    req: &HttpRequest,
    body: &[u8],
) -> Result<HttpResponse> {
    let query = query_fields(req)?;
    let body = body_fields(req, body)?;

    let create_issue: &dyn CreateIssueInterface = ctx.core_module.resolve_ref();
    let result = create_issue
        .run(&ctx.as_core_context(), project, &body, &query)
        .await;

    respond("create", result, |issue| HttpResponse::Ok().json(issue))
}

#[tracing::instrument(skip_all, fields(project = %project))]
pub(crate) async fn create_issue(
    ctx: web::Data<AppContext>,
    project: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    create_issue_in(&ctx, &project, &req, &body).await
}

/// Create an issue in the default project.
#[tracing::instrument(skip_all)]
pub(crate) async fn create_default_project_issue(
    ctx: web::Data<AppContext>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    create_issue_in(&ctx, "", &req, &body).await
}

#[tracing::instrument(skip_all, fields(project = %project))]
pub(crate) async fn update_issue(
    ctx: web::Data<AppContext>,
    project: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let body = body_fields(&req, &body)?;

    let update_issue: &dyn UpdateIssueInterface = ctx.core_module.resolve_ref();
    let result = update_issue.run(&ctx.as_core_context(), &body).await;

    respond("update", result, |id| {
        HttpResponse::Ok().json(serde_json::json!({
            "result": "successfully updated",
            "_id": id
        }))
    })
}

#[tracing::instrument(skip_all, fields(project = %project))]
pub(crate) async fn delete_issue(
    ctx: web::Data<AppContext>,
    project: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let body = body_fields(&req, &body)?;

    let delete_issue: &dyn DeleteIssueInterface = ctx.core_module.resolve_ref();
    let result = delete_issue.run(&ctx.as_core_context(), &body).await;

    respond("delete", result, |id| {
        HttpResponse::Ok().json(serde_json::json!({
            "result": "successfully deleted",
            "_id": id
        }))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn rejection_bodies() {
        assert_eq!(
            rejection_body(&DomainError::MissingId),
            json!({"error": "missing _id"})
        );
        assert_eq!(
            rejection_body(&DomainError::DeleteFailed { id: "abc".into() }),
            json!({"error": "could not delete", "_id": "abc"})
        );
    }
}
