//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Stateless step validation and instruction generation
//!   - Starting, reading and discarding wizard sessions
//!   - Applying one wizard action to a stored session

use tracing::{info, instrument, warn};

use crate::domain::{PaperConfig, QuestionTypeDistribution};
use crate::error::WizardResult;
use crate::instructions::generate_instructions;
use crate::protocol::{to_out, ValidationOut, WizardOut};
use crate::state::AppState;
use crate::util::trunc_for_log;
use crate::validation::{validate_step, WizardStep};
use crate::wizard::{reduce, WizardAction};

/// Validate `config` for the step at index `step`; indices past the last step are rejected.
#[instrument(level = "info", skip(config))]
pub fn do_validate(config: &PaperConfig, step: u8) -> WizardResult<ValidationOut> {
  let step = WizardStep::try_from(step)?;
  let errors = validate_step(config, step);
  Ok(ValidationOut { valid: errors.is_empty(), errors })
}

#[instrument(level = "info", skip_all, fields(entries = question_types.len()))]
pub fn do_generate_instructions(question_types: &[QuestionTypeDistribution]) -> String {
  let text = generate_instructions(question_types);
  tracing::debug!(target: "wizard", preview = %trunc_for_log(&text, 80), len = text.len(), "Instructions generated");
  text
}

#[instrument(level = "info", skip(state))]
pub async fn start_wizard(state: &AppState) -> WizardOut {
  let (id, wizard) = state.create_session().await;
  info!(target: "wizard", session = %id, "Wizard session started");
  to_out(&id, &wizard)
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn get_wizard(state: &AppState, session_id: &str) -> WizardResult<WizardOut> {
  let wizard = state.get_session(session_id).await?;
  Ok(to_out(session_id, &wizard))
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn discard_wizard(state: &AppState, session_id: &str) -> WizardResult<()> {
  state.remove_session(session_id).await?;
  info!(target: "wizard", session = %session_id, "Wizard session discarded");
  Ok(())
}

/// Reduce the stored snapshot with `action` and store the result, atomically per session.
/// A successful submit drops the session; the caller gets the final snapshot.
#[instrument(level = "info", skip(state, action), fields(%session_id, action = action.name()))]
pub async fn apply_wizard_action(state: &AppState, session_id: &str, action: WizardAction) -> WizardResult<WizardOut> {
  let next = state
    .update_session(session_id, |current| reduce(current, action, &state.catalog))
    .await
    .map_err(|e| {
      warn!(target: "wizard", session = %session_id, error = %e, "Wizard action rejected");
      e
    })?;

  if next.submitted {
    info!(target: "wizard", session = %session_id, "Submitted paper handed off; session closed");
  }
  Ok(to_out(session_id, &next))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::WizardConfig;
  use crate::domain::{ExamType, QuestionType};
  use crate::error::WizardError;
  use std::sync::Arc;

  #[test]
  fn validate_wraps_field_errors() {
    let out = do_validate(&PaperConfig::default(), WizardStep::PaperDetails.index()).expect("step 1");
    assert!(!out.valid);
    assert_eq!(out.errors.len(), 2);

    let cfg = PaperConfig { exam_type: Some(ExamType::Entrance), ..PaperConfig::default() };
    assert!(do_validate(&cfg, WizardStep::BasicInfo.index()).expect("step 0").valid);
  }

  #[test]
  fn validate_rejects_step_past_final() {
    assert_eq!(do_validate(&PaperConfig::default(), 7).unwrap_err(), WizardError::InvalidStep(7));
  }

  #[tokio::test]
  async fn actions_update_the_stored_session() {
    let state = AppState::from_config(&WizardConfig::default());
    let started = start_wizard(&state).await;

    let out = apply_wizard_action(
      &state,
      &started.session_id,
      WizardAction::ToggleQuestionType { question_type: QuestionType::Mcq, enabled: true },
    )
    .await
    .expect("toggle");
    assert_eq!(out.config.question_types.len(), 1);

    let stored = get_wizard(&state, &started.session_id).await.expect("get");
    assert_eq!(stored.config.question_types.len(), 1);
  }

  #[tokio::test]
  async fn concurrent_actions_on_one_session_all_apply() {
    let state = Arc::new(AppState::from_config(&WizardConfig::default()));
    let started = start_wizard(&state).await;
    let kinds = [QuestionType::Mcq, QuestionType::TrueFalse, QuestionType::FillInBlanks, QuestionType::ShortAnswer];

    let tasks: Vec<_> = kinds
      .into_iter()
      .map(|kind| {
        let state = Arc::clone(&state);
        let id = started.session_id.clone();
        tokio::spawn(async move {
          apply_wizard_action(&state, &id, WizardAction::ToggleQuestionType { question_type: kind, enabled: true }).await
        })
      })
      .collect();
    for task in tasks {
      task.await.expect("join").expect("toggle");
    }

    let stored = get_wizard(&state, &started.session_id).await.expect("get");
    assert_eq!(stored.config.question_types.len(), 4);
  }

  #[tokio::test]
  async fn rejected_actions_leave_session_untouched() {
    let state = AppState::from_config(&WizardConfig::default());
    let started = start_wizard(&state).await;
    let err = apply_wizard_action(&state, &started.session_id, WizardAction::Submit).await.unwrap_err();
    assert_eq!(err, WizardError::NotAtFinalStep);
    assert_eq!(state.session_count().await, 1);

    discard_wizard(&state, &started.session_id).await.expect("discard");
    let err = get_wizard(&state, &started.session_id).await.unwrap_err();
    assert!(matches!(err, WizardError::UnknownSession(_)));
  }
}
