//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, State}, http::StatusCode, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::WizardError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;
use crate::wizard::WizardAction;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, sessions: state.session_count().await })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_catalog(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(catalog_out(&state.catalog))
}

#[instrument(level = "info", skip(body), fields(step = body.step))]
pub async fn http_post_validate(Json(body): Json<ValidateIn>) -> Result<Json<ValidationOut>, WizardError> {
  let out = do_validate(&body.config, body.step)?;
  info!(target: "wizard", step = body.step, valid = out.valid, errors = out.errors.len(), "HTTP validate evaluated");
  Ok(Json(out))
}

#[instrument(level = "info", skip(body), fields(entries = body.question_types.len()))]
pub async fn http_post_instructions(Json(body): Json<InstructionsIn>) -> impl IntoResponse {
  let instructions = do_generate_instructions(&body.question_types);
  Json(InstructionsOut { instructions })
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_wizard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let out = start_wizard(&state).await;
  (StatusCode::CREATED, Json(out))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_wizard(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<WizardOut>, WizardError> {
  get_wizard(&state, &id).await.map(Json)
}

#[instrument(level = "info", skip(state, action), fields(%id, action = action.name()))]
pub async fn http_post_wizard_action(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(action): Json<WizardAction>,
) -> Result<Json<WizardOut>, WizardError> {
  let out = apply_wizard_action(&state, &id, action).await?;
  info!(target: "wizard", session = %id, step = out.step.index(), errors = out.errors.len(), submitted = out.submitted, "HTTP wizard action applied");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_delete_wizard(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<StatusCode, WizardError> {
  discard_wizard(&state, &id).await?;
  Ok(StatusCode::NO_CONTENT)
}
