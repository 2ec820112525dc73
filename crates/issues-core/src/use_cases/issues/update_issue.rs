use async_trait::async_trait;
use issues_models::{
    current_timestamp, IssueField, IssuePatch, PatchValue, RawValue, RequestFields,
};
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait UpdateIssueInterface: Interface {
    /// Update an issue, returning its identifier.
    async fn run<'a>(&self, ctx: &CoreContext<'a>, body: &RequestFields) -> Result<String>;
}

#[derive(Component)]
#[shaku(interface = UpdateIssueInterface)]
pub(crate) struct UpdateIssue;

#[async_trait]
impl UpdateIssueInterface for UpdateIssue {
    #[tracing::instrument(skip(self, ctx, body))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, body: &RequestFields) -> Result<String> {
        let id = body
            .present_text(IssueField::Id.to_str())
            .ok_or(DomainError::MissingId)?;

        if !Self::has_update_fields(body) {
            return Err(DomainError::NoUpdateFields { id });
        }

        let patch = IssuePatch::new(Self::build_patch_values(body), current_timestamp());
        if ctx.db_service.issues_update(&id, patch).await? {
            info!(issue_id = %id, "Updated issue");
            Ok(id)
        } else {
            Err(DomainError::UpdateFailed { id })
        }
    }
}

impl UpdateIssue {
    /// Any present field other than `_id` and `project` counts as an update,
    /// even when the store has nothing to rewrite for it.
    pub fn has_update_fields(body: &RequestFields) -> bool {
        body.present_fields().any(|(name, _)| {
            name != IssueField::Id.to_str() && name != IssueField::Project.to_str()
        })
    }

    /// Keep present, patchable fields only.
    pub fn build_patch_values(body: &RequestFields) -> Vec<(IssueField, PatchValue)> {
        body.present_fields()
            .filter_map(|(name, value)| {
                let field = IssueField::try_from(name)
                    .ok()
                    .filter(|f| f.is_patchable())?;

                Some((field, Self::patch_value(field, value)))
            })
            .collect()
    }

    fn patch_value(field: IssueField, value: &RawValue) -> PatchValue {
        match (field, value) {
            (IssueField::Open, RawValue::Flag(flag)) => PatchValue::Flag(*flag),
            // Only the exact text "false" closes an issue here.
            (IssueField::Open, RawValue::Text(text)) if text == "false" => PatchValue::Flag(false),
            _ => PatchValue::Text(value.to_text()),
        }
    }
}
