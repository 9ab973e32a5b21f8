//! Wizard state machine.
//!
//! `WizardState` is an immutable snapshot; `reduce` takes the current snapshot
//! plus one user action and returns the next snapshot (or a `WizardError` when
//! the action cannot be applied). Validation and instruction generation are
//! called from here but never hold onto the state.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::catalog::{default_marks, Catalog};
use crate::domain::{
  Board, Class, DifficultyLevel, ExamType, PaperConfig, PaperType, QuestionType,
  QuestionTypeDistribution, SpecificExamType, TopicWeightage,
};
use crate::error::{WizardError, WizardResult};
use crate::instructions::generate_instructions;
use crate::validation::{validate_step, FieldErrors, WizardStep};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
  pub step: WizardStep,
  pub config: PaperConfig,
  pub errors: FieldErrors,
  pub submitted: bool,
}

impl WizardState {
  pub fn new(config: PaperConfig) -> Self {
    Self { step: WizardStep::FIRST, config, errors: FieldErrors::default(), submitted: false }
  }
}

/// One user interaction with the wizard form.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum WizardAction {
  #[serde(rename_all = "camelCase")]
  SetExamType { exam_type: ExamType },
  SetBoard { board: Board },
  SetClass { class: Class },
  SetSubject { subject: String },
  #[serde(rename_all = "camelCase")]
  SetTopics { topic_ids: Vec<String> },
  #[serde(rename_all = "camelCase")]
  SetSpecificExamType { specific_exam_type: SpecificExamType },
  #[serde(rename_all = "camelCase")]
  SetPaperType { paper_type: PaperType },
  #[serde(rename_all = "camelCase")]
  SetPaperDetails {
    #[serde(default)]
    total_marks: Option<u32>,
    #[serde(default)]
    total_questions: Option<u32>,
    #[serde(default)]
    duration: Option<u32>,
  },
  #[serde(rename_all = "camelCase")]
  ToggleQuestionType { question_type: QuestionType, enabled: bool },
  #[serde(rename_all = "camelCase")]
  SetQuestionQuantity { question_type: QuestionType, quantity: i64 },
  #[serde(rename_all = "camelCase")]
  SetQuestionMarks { question_type: QuestionType, marks: i64 },
  #[serde(rename_all = "camelCase")]
  SetDifficultyLevel { difficulty_level: DifficultyLevel },
  SetCustomDifficulty {
    #[serde(default)]
    easy: Option<u32>,
    #[serde(default)]
    moderate: Option<u32>,
    #[serde(default)]
    hard: Option<u32>,
  },
  SetTitle { title: String },
  SetInstructions { instructions: String },
  RegenerateInstructions,
  Next,
  Back,
  Submit,
}

impl WizardAction {
  pub fn name(&self) -> &'static str {
    match self {
      WizardAction::SetExamType { .. } => "setExamType",
      WizardAction::SetBoard { .. } => "setBoard",
      WizardAction::SetClass { .. } => "setClass",
      WizardAction::SetSubject { .. } => "setSubject",
      WizardAction::SetTopics { .. } => "setTopics",
      WizardAction::SetSpecificExamType { .. } => "setSpecificExamType",
      WizardAction::SetPaperType { .. } => "setPaperType",
      WizardAction::SetPaperDetails { .. } => "setPaperDetails",
      WizardAction::ToggleQuestionType { .. } => "toggleQuestionType",
      WizardAction::SetQuestionQuantity { .. } => "setQuestionQuantity",
      WizardAction::SetQuestionMarks { .. } => "setQuestionMarks",
      WizardAction::SetDifficultyLevel { .. } => "setDifficultyLevel",
      WizardAction::SetCustomDifficulty { .. } => "setCustomDifficulty",
      WizardAction::SetTitle { .. } => "setTitle",
      WizardAction::SetInstructions { .. } => "setInstructions",
      WizardAction::RegenerateInstructions => "regenerateInstructions",
      WizardAction::Next => "next",
      WizardAction::Back => "back",
      WizardAction::Submit => "submit",
    }
  }
}

/// Apply one action to a snapshot, producing the next snapshot.
#[instrument(level = "debug", skip_all, fields(action = action.name(), step = state.step.index()))]
pub fn reduce(state: &WizardState, action: WizardAction, catalog: &Catalog) -> WizardResult<WizardState> {
  if state.submitted {
    return Err(WizardError::AlreadySubmitted);
  }

  let mut next = state.clone();
  let cfg = &mut next.config;

  match action {
    WizardAction::SetExamType { exam_type } => cfg.exam_type = Some(exam_type),
    WizardAction::SetBoard { board } => cfg.board = Some(board),

    WizardAction::SetClass { class } => {
      cfg.class = Some(class);
      cfg.subject = None;
      cfg.selected_topics.clear();
    }

    WizardAction::SetSubject { subject } => {
      let class = cfg.class.ok_or(WizardError::ClassNotSelected)?;
      if !catalog.offers_subject(class, &subject) {
        return Err(WizardError::SubjectNotOffered { class: class.to_string(), subject });
      }
      // Every topic of the subject starts selected.
      let topics: Vec<_> = catalog.topics_for(&subject).collect();
      let weightage = even_share(100, topics.len());
      cfg.selected_topics = topics
        .into_iter()
        .map(|t| TopicWeightage { topic_id: t.id.clone(), name: t.name.clone(), weightage, question_count: 0 })
        .collect();
      cfg.subject = Some(subject);
    }

    WizardAction::SetTopics { topic_ids } => {
      let subject = cfg.subject.as_deref().ok_or(WizardError::SubjectNotSelected)?;
      let mut picked = Vec::with_capacity(topic_ids.len());
      for id in &topic_ids {
        let topic = catalog
          .topics_for(subject)
          .find(|t| &t.id == id)
          .ok_or_else(|| WizardError::UnknownTopic(id.clone()))?;
        picked.push(topic);
      }
      let weightage = even_share(100, picked.len());
      let question_count = even_share(cfg.total_questions, picked.len());
      cfg.selected_topics = picked
        .into_iter()
        .map(|t| TopicWeightage { topic_id: t.id.clone(), name: t.name.clone(), weightage, question_count })
        .collect();
    }

    WizardAction::SetSpecificExamType { specific_exam_type } => cfg.specific_exam_type = specific_exam_type,
    WizardAction::SetPaperType { paper_type } => cfg.paper_type = paper_type,

    WizardAction::SetPaperDetails { total_marks, total_questions, duration } => {
      if let Some(v) = total_marks {
        cfg.total_marks = v;
      }
      if let Some(v) = total_questions {
        cfg.total_questions = v;
      }
      if let Some(v) = duration {
        cfg.duration = v;
      }
    }

    WizardAction::ToggleQuestionType { question_type, enabled } => {
      let present = cfg.distribution_entry(&question_type).is_some();
      if enabled && !present {
        let marks = default_marks(&question_type);
        cfg.question_types.push(QuestionTypeDistribution::new(question_type, 0, marks));
      } else if !enabled {
        cfg.question_types.retain(|d| d.kind != question_type);
      }
      autofill_instructions(cfg);
    }

    WizardAction::SetQuestionQuantity { question_type, quantity } => {
      entry_mut(cfg, &question_type)?.quantity = quantity;
      autofill_instructions(cfg);
    }

    WizardAction::SetQuestionMarks { question_type, marks } => {
      entry_mut(cfg, &question_type)?.marks = marks;
      autofill_instructions(cfg);
    }

    WizardAction::SetDifficultyLevel { difficulty_level } => cfg.difficulty_level = Some(difficulty_level),

    WizardAction::SetCustomDifficulty { easy, moderate, hard } => {
      let split = &mut cfg.custom_difficulty;
      if let Some(v) = easy {
        split.easy = v;
      }
      if let Some(v) = moderate {
        split.moderate = v;
      }
      if let Some(v) = hard {
        split.hard = v;
      }
    }

    WizardAction::SetTitle { title } => cfg.title = title,
    WizardAction::SetInstructions { instructions } => cfg.instructions = instructions,
    WizardAction::RegenerateInstructions => cfg.instructions = generate_instructions(&cfg.question_types),

    WizardAction::Next => {
      next.errors = validate_step(&next.config, next.step);
      if next.errors.is_empty() {
        if let Some(step) = next.step.next() {
          next.step = step;
        }
      }
      debug!(target: "wizard", from = state.step.index(), to = next.step.index(), errors = next.errors.len(), "Next requested");
    }

    WizardAction::Back => {
      next.step = next.step.prev().unwrap_or(WizardStep::FIRST);
      next.errors = FieldErrors::default();
    }

    WizardAction::Submit => {
      if next.step != WizardStep::LAST {
        return Err(WizardError::NotAtFinalStep);
      }
      next.errors = validate_step(&next.config, next.step);
      next.submitted = next.errors.is_empty();
      if next.submitted {
        info!(target: "wizard", title = %next.config.title, total_marks = next.config.total_marks, "Paper configuration submitted");
      }
    }
  }

  Ok(next)
}

/// ⌊total / n⌋, or 0 for an empty selection.
fn even_share(total: u32, n: usize) -> u32 {
  match u32::try_from(n) {
    Ok(0) | Err(_) => 0,
    Ok(n) => total / n,
  }
}

fn entry_mut<'a>(cfg: &'a mut PaperConfig, kind: &QuestionType) -> WizardResult<&'a mut QuestionTypeDistribution> {
  cfg
    .question_types
    .iter_mut()
    .find(|d| &d.kind == kind)
    .ok_or_else(|| WizardError::QuestionTypeNotSelected(kind.id().to_string()))
}

/// Distribution edits refresh the instructions unless nothing is selected.
fn autofill_instructions(cfg: &mut PaperConfig) {
  if !cfg.question_types.is_empty() {
    cfg.instructions = generate_instructions(&cfg.question_types);
  }
}
