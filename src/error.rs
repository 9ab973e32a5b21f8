//! Boundary errors for the wizard service.
//!
//! Per-field validation problems are not errors: they come back as
//! `FieldErrors` values. This enum only covers requests that cannot be applied
//! at all (bad step index, unknown session, inconsistent selections).

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
  #[error("step index {0} is out of range (expected 0..=4)")]
  InvalidStep(u8),

  #[error("unknown wizard session: {0}")]
  UnknownSession(String),

  #[error("select a class before choosing a subject")]
  ClassNotSelected,

  #[error("subject '{subject}' is not offered for {class}")]
  SubjectNotOffered { class: String, subject: String },

  #[error("select a subject before choosing topics")]
  SubjectNotSelected,

  #[error("topic '{0}' is not available for the selected subject")]
  UnknownTopic(String),

  #[error("question type '{0}' is not part of the distribution")]
  QuestionTypeNotSelected(String),

  #[error("the paper can only be submitted from the final step")]
  NotAtFinalStep,

  #[error("the paper has already been submitted")]
  AlreadySubmitted,
}

impl WizardError {
  pub fn status(&self) -> StatusCode {
    match self {
      WizardError::UnknownSession(_) => StatusCode::NOT_FOUND,
      WizardError::NotAtFinalStep | WizardError::AlreadySubmitted => StatusCode::CONFLICT,
      _ => StatusCode::BAD_REQUEST,
    }
  }
}

impl IntoResponse for WizardError {
  fn into_response(self) -> Response {
    let status = self.status();
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}

pub type WizardResult<T> = Result<T, WizardError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_codes_follow_error_kind() {
    assert_eq!(WizardError::UnknownSession("x".into()).status(), StatusCode::NOT_FOUND);
    assert_eq!(WizardError::NotAtFinalStep.status(), StatusCode::CONFLICT);
    assert_eq!(WizardError::InvalidStep(7).status(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn messages_name_the_offending_value() {
    let e = WizardError::SubjectNotOffered { class: "Class 5".into(), subject: "Physics".into() };
    assert_eq!(e.to_string(), "subject 'Physics' is not offered for Class 5");
  }
}
