//! Per-step validation of a `PaperConfig`.
//!
//! `validate_step` is recomputed from scratch on every call and never fails:
//! every problem is reported as an entry in the returned `FieldErrors` map, and
//! an empty map means the wizard may advance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{DifficultyLevel, ExamType, PaperConfig};
use crate::error::WizardError;

/// The five wizard steps, addressed on the wire by index 0..=4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WizardStep {
  BasicInfo,
  PaperDetails,
  QuestionTypes,
  Difficulty,
  FinalDetails,
}

impl WizardStep {
  pub const FIRST: WizardStep = WizardStep::BasicInfo;
  pub const LAST: WizardStep = WizardStep::FinalDetails;

  pub fn index(self) -> u8 {
    self as u8
  }

  pub fn next(self) -> Option<WizardStep> {
    WizardStep::try_from(self.index() + 1).ok()
  }

  pub fn prev(self) -> Option<WizardStep> {
    self.index().checked_sub(1).and_then(|i| WizardStep::try_from(i).ok())
  }

  pub fn label(self) -> &'static str {
    match self {
      WizardStep::BasicInfo => "Basic Information",
      WizardStep::PaperDetails => "Paper Details",
      WizardStep::QuestionTypes => "Question Types",
      WizardStep::Difficulty => "Difficulty Level",
      WizardStep::FinalDetails => "Final Details",
    }
  }
}

impl TryFrom<u8> for WizardStep {
  type Error = WizardError;

  fn try_from(i: u8) -> Result<Self, Self::Error> {
    match i {
      0 => Ok(WizardStep::BasicInfo),
      1 => Ok(WizardStep::PaperDetails),
      2 => Ok(WizardStep::QuestionTypes),
      3 => Ok(WizardStep::Difficulty),
      4 => Ok(WizardStep::FinalDetails),
      other => Err(WizardError::InvalidStep(other)),
    }
  }
}

impl From<WizardStep> for u8 {
  fn from(s: WizardStep) -> Self {
    s.index()
  }
}

/// Form fields that can carry an error message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
  ExamType,
  Board,
  Class,
  Subject,
  TotalMarks,
  TotalQuestions,
  Duration,
  QuestionDistribution,
  DifficultyLevel,
  CustomDifficulty,
  Title,
  Instructions,
}

/// Field name → human-readable message. Empty means valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[cfg(test)]
  pub fn get(&self, field: Field) -> Option<&str> {
    self.0.get(&field).map(String::as_str)
  }

  #[cfg(test)]
  pub fn contains(&self, field: Field) -> bool {
    self.0.contains_key(&field)
  }

  fn set(&mut self, field: Field, message: impl Into<String>) {
    self.0.insert(field, message.into());
  }

  /// Appends to an existing message in the same slot, space separated.
  fn append(&mut self, field: Field, message: &str) {
    let slot = self.0.entry(field).or_default();
    if !slot.is_empty() {
      slot.push(' ');
    }
    slot.push_str(message);
  }
}

#[instrument(level = "debug", skip_all, fields(step = step.index()))]
pub fn validate_step(config: &PaperConfig, step: WizardStep) -> FieldErrors {
  let mut errors = FieldErrors::default();

  match step {
    WizardStep::BasicInfo => {
      match config.exam_type {
        None => errors.set(Field::ExamType, "Please select an exam type"),
        Some(ExamType::School) => {
          if config.board.is_none() {
            errors.set(Field::Board, "Please select a board");
          }
          if config.class.is_none() {
            errors.set(Field::Class, "Please select a class");
          }
          if config.subject.as_deref().map_or(true, str::is_empty) {
            errors.set(Field::Subject, "Please select a subject");
          }
        }
        Some(_) => {}
      }
    }

    WizardStep::PaperDetails => {
      if config.total_marks == 0 {
        errors.set(Field::TotalMarks, "Please enter total marks");
      }
      if config.total_questions == 0 {
        errors.set(Field::TotalQuestions, "Please enter total questions");
      }
      if config.duration == 0 {
        errors.set(Field::Duration, "Please enter duration");
      }
    }

    WizardStep::QuestionTypes => {
      let (sum_quantity, sum_marks) = distribution_totals(config);
      if sum_quantity != i64::from(config.total_questions) {
        errors.append(
          Field::QuestionDistribution,
          &format!("Total questions must equal {}", config.total_questions),
        );
      }
      if sum_marks != i64::from(config.total_marks) {
        errors.append(
          Field::QuestionDistribution,
          &format!("Total marks must equal {}", config.total_marks),
        );
      }
      debug!(target: "wizard", sum_quantity, sum_marks, total_questions = config.total_questions, total_marks = config.total_marks, "Distribution reconciled");
    }

    WizardStep::Difficulty => {
      match config.difficulty_level {
        None => errors.set(Field::DifficultyLevel, "Please select a difficulty level"),
        Some(DifficultyLevel::Custom) => {
          if config.custom_difficulty.total() != 100 {
            errors.set(Field::CustomDifficulty, "Difficulty percentages must add up to 100%");
          }
        }
        Some(_) => {}
      }
    }

    WizardStep::FinalDetails => {
      if config.title.trim().is_empty() {
        errors.set(Field::Title, "Please enter a title");
      }
      if config.instructions.trim().is_empty() {
        errors.set(Field::Instructions, "Please enter instructions");
      }
    }
  }

  debug!(target: "wizard", step = step.index(), error_count = errors.len(), "Step validated");
  errors
}

/// (Σ quantity, Σ quantity × marks) over the distribution, saturating.
pub fn distribution_totals(config: &PaperConfig) -> (i64, i64) {
  config.question_types.iter().fold((0i64, 0i64), |(q, m), d| {
    (q.saturating_add(d.quantity), m.saturating_add(d.quantity.saturating_mul(d.marks)))
  })
}
