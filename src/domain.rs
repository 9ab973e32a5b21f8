//! Domain models for the paper wizard: exam/board/class enums, the question-type
//! distribution, and the `PaperConfig` value the wizard edits step by step.
//!
//! Wire format is camelCase JSON, matching what the dashboard UI sends.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which family of exam the paper is for. Only `School` asks for board/class/subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExamType {
  School,
  Entrance,
  SchoolEntrance,
  Olympiads,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Board {
  #[serde(rename = "CBSE")]
  Cbse,
  #[serde(rename = "ICSE")]
  Icse,
  #[serde(rename = "State Board")]
  StateBoard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Class {
  #[serde(rename = "Class 5")]
  Class5,
  #[serde(rename = "Class 6")]
  Class6,
  #[serde(rename = "Class 7")]
  Class7,
  #[serde(rename = "Class 8")]
  Class8,
  #[serde(rename = "Class 9")]
  Class9,
  #[serde(rename = "Class 10")]
  Class10,
  #[serde(rename = "Class 11")]
  Class11,
  #[serde(rename = "Class 12")]
  Class12,
}

impl Class {
  pub const ALL: [Class; 8] = [
    Class::Class5,
    Class::Class6,
    Class::Class7,
    Class::Class8,
    Class::Class9,
    Class::Class10,
    Class::Class11,
    Class::Class12,
  ];

  pub fn from_label(label: &str) -> Option<Class> {
    Class::ALL.into_iter().find(|c| c.label() == label)
  }

  pub fn label(self) -> &'static str {
    match self {
      Class::Class5 => "Class 5",
      Class::Class6 => "Class 6",
      Class::Class7 => "Class 7",
      Class::Class8 => "Class 8",
      Class::Class9 => "Class 9",
      Class::Class10 => "Class 10",
      Class::Class11 => "Class 11",
      Class::Class12 => "Class 12",
    }
  }
}

impl fmt::Display for Class {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecificExamType {
  #[default]
  #[serde(rename = "Unit Test")]
  UnitTest,
  #[serde(rename = "Board Exam")]
  BoardExam,
  Practice,
  Mock,
  #[serde(rename = "Topic Test")]
  TopicTest,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperType {
  Objective,
  Subjective,
  #[default]
  Mixed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyLevel {
  Easy,
  Moderate,
  Hard,
  Random,
  Custom,
}

/// Question type identifier.
///
/// The five canonical kinds carry catalog metadata (display name, default marks,
/// a type-specific instruction line). Anything else is kept verbatim so the
/// generator can echo it back instead of failing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
  Mcq,
  TrueFalse,
  FillInBlanks,
  ShortAnswer,
  LongAnswer,
  Other(String),
}

impl QuestionType {
  /// Wire identifier; also the sort key for instruction sections.
  pub fn id(&self) -> &str {
    match self {
      QuestionType::Mcq => "mcq",
      QuestionType::TrueFalse => "trueFalse",
      QuestionType::FillInBlanks => "fillInBlanks",
      QuestionType::ShortAnswer => "shortAnswer",
      QuestionType::LongAnswer => "longAnswer",
      QuestionType::Other(s) => s,
    }
  }
}

impl From<String> for QuestionType {
  fn from(s: String) -> Self {
    match s.as_str() {
      "mcq" => QuestionType::Mcq,
      "trueFalse" => QuestionType::TrueFalse,
      "fillInBlanks" => QuestionType::FillInBlanks,
      "shortAnswer" => QuestionType::ShortAnswer,
      "longAnswer" => QuestionType::LongAnswer,
      _ => QuestionType::Other(s),
    }
  }
}

impl From<&str> for QuestionType {
  fn from(s: &str) -> Self {
    QuestionType::from(s.to_string())
  }
}

impl From<QuestionType> for String {
  fn from(t: QuestionType) -> Self {
    match t {
      QuestionType::Other(s) => s,
      known => known.id().to_string(),
    }
  }
}

impl fmt::Display for QuestionType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.id())
  }
}

/// One row of the distribution. Quantity and marks are signed: the engine reads
/// them as given and leaves range checks to the input widgets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTypeDistribution {
  #[serde(rename = "type")]
  pub kind: QuestionType,
  pub quantity: i64,
  pub marks: i64,
}

impl QuestionTypeDistribution {
  pub fn new(kind: impl Into<QuestionType>, quantity: i64, marks: i64) -> Self {
    Self { kind: kind.into(), quantity, marks }
  }
}

/// Percent split used when `difficultyLevel = Custom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDifficulty {
  pub easy: u32,
  pub moderate: u32,
  pub hard: u32,
}

impl CustomDifficulty {
  pub fn total(&self) -> u64 {
    u64::from(self.easy) + u64::from(self.moderate) + u64::from(self.hard)
  }
}

impl Default for CustomDifficulty {
  fn default() -> Self {
    Self { easy: 30, moderate: 40, hard: 30 }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicWeightage {
  pub topic_id: String,
  pub name: String,
  pub weightage: u32,
  pub question_count: u32,
}

/// The paper being configured. Counts of 0 mean "not entered yet".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperConfig {
  #[serde(default)]
  pub exam_type: Option<ExamType>,
  #[serde(default)]
  pub board: Option<Board>,
  #[serde(default)]
  pub class: Option<Class>,
  #[serde(default)]
  pub subject: Option<String>,
  #[serde(default)]
  pub specific_exam_type: SpecificExamType,
  #[serde(default)]
  pub paper_type: PaperType,
  #[serde(default)]
  pub difficulty_level: Option<DifficultyLevel>,
  #[serde(default)]
  pub custom_difficulty: CustomDifficulty,
  #[serde(default)]
  pub selected_topics: Vec<TopicWeightage>,
  #[serde(default)]
  pub question_types: Vec<QuestionTypeDistribution>,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub total_marks: u32,
  #[serde(default)]
  pub total_questions: u32,
  #[serde(default)]
  pub duration: u32,
  #[serde(default)]
  pub instructions: String,
}

impl Default for PaperConfig {
  fn default() -> Self {
    Self {
      exam_type: Some(ExamType::School),
      board: None,
      class: None,
      subject: None,
      specific_exam_type: SpecificExamType::default(),
      paper_type: PaperType::default(),
      difficulty_level: Some(DifficultyLevel::Moderate),
      custom_difficulty: CustomDifficulty::default(),
      selected_topics: Vec::new(),
      question_types: Vec::new(),
      title: String::new(),
      total_marks: 0,
      total_questions: 0,
      duration: 180,
      instructions: String::new(),
    }
  }
}

impl PaperConfig {
  pub fn distribution_entry(&self, kind: &QuestionType) -> Option<&QuestionTypeDistribution> {
    self.question_types.iter().find(|d| &d.kind == kind)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn question_type_ids_round_trip_through_strings() {
    let t: QuestionType = serde_json::from_str("\"shortAnswer\"").expect("known id");
    assert_eq!(t, QuestionType::ShortAnswer);
    let other: QuestionType = serde_json::from_str("\"essay\"").expect("unknown id");
    assert_eq!(other, QuestionType::Other("essay".into()));
    assert_eq!(serde_json::to_string(&other).expect("ser"), "\"essay\"");
  }

  #[test]
  fn config_accepts_ui_json() {
    let raw = r#"{
      "examType": "school",
      "board": "State Board",
      "class": "Class 10",
      "subject": "Science",
      "specificExamType": "Board Exam",
      "paperType": "Objective",
      "difficultyLevel": "Custom",
      "customDifficulty": { "easy": 20, "moderate": 50, "hard": 30 },
      "questionTypes": [{ "type": "mcq", "quantity": 10, "marks": 1 }],
      "totalMarks": 10,
      "totalQuestions": 10,
      "duration": 60
    }"#;
    let cfg: PaperConfig = serde_json::from_str(raw).expect("parse");
    assert_eq!(cfg.board, Some(Board::StateBoard));
    assert_eq!(cfg.class, Some(Class::Class10));
    assert_eq!(cfg.difficulty_level, Some(DifficultyLevel::Custom));
    assert_eq!(cfg.custom_difficulty.total(), 100);
    assert_eq!(cfg.question_types[0].kind, QuestionType::Mcq);
    assert!(cfg.title.is_empty());
  }

  #[test]
  fn defaults_match_wizard_mount_state() {
    let cfg = PaperConfig::default();
    assert_eq!(cfg.exam_type, Some(ExamType::School));
    assert_eq!(cfg.specific_exam_type, SpecificExamType::UnitTest);
    assert_eq!(cfg.paper_type, PaperType::Mixed);
    assert_eq!(cfg.difficulty_level, Some(DifficultyLevel::Moderate));
    assert_eq!(cfg.total_marks, 0);
    assert_eq!(cfg.total_questions, 0);
  }
}
