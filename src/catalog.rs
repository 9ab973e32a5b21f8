//! Built-in catalog data: the question-type table, subjects offered per class,
//! and a small sample topic list.
//!
//! The question-type table is the single source of display names and default
//! marks; the wizard, the instruction generator and the `/catalog` endpoint all
//! read from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Class, QuestionType};

/// Display metadata for one canonical question type.
#[derive(Debug)]
pub struct QuestionTypeInfo {
  pub kind: QuestionType,
  pub label: &'static str,
  pub default_marks: i64,
  /// Position in the type-specific block of the general instructions.
  pub instruction_priority: u8,
  pub instruction: &'static str,
}

/// Ordered as the UI lists the checkboxes.
pub static QUESTION_TYPES: [QuestionTypeInfo; 5] = [
  QuestionTypeInfo {
    kind: QuestionType::TrueFalse,
    label: "True/False",
    default_marks: 1,
    instruction_priority: 1,
    instruction: "For True/False questions, clearly mark your answer as either True or False.",
  },
  QuestionTypeInfo {
    kind: QuestionType::Mcq,
    label: "Multiple Choice",
    default_marks: 1,
    instruction_priority: 0,
    instruction: "For Multiple-choice Questions, choose the most appropriate answer.",
  },
  QuestionTypeInfo {
    kind: QuestionType::FillInBlanks,
    label: "Fill in the Blanks",
    default_marks: 1,
    instruction_priority: 2,
    instruction: "For Fill-in-the-blank, provide precise and concise answers.",
  },
  QuestionTypeInfo {
    kind: QuestionType::ShortAnswer,
    label: "Short Answer",
    default_marks: 3,
    instruction_priority: 3,
    instruction: "Short-answer questions should be answered within the specified word limit.",
  },
  QuestionTypeInfo {
    kind: QuestionType::LongAnswer,
    label: "Long Answer",
    default_marks: 5,
    instruction_priority: 4,
    instruction: "Long Answer questions require detailed explanations with examples where applicable.",
  },
];

pub fn question_type_info(kind: &QuestionType) -> Option<&'static QuestionTypeInfo> {
  QUESTION_TYPES.iter().find(|info| &info.kind == kind)
}

/// Human-readable name; unknown identifiers are echoed back as-is.
pub fn display_name(kind: &QuestionType) -> &str {
  match question_type_info(kind) {
    Some(info) => info.label,
    None => kind.id(),
  }
}

/// Marks a freshly enabled question type starts with.
pub fn default_marks(kind: &QuestionType) -> i64 {
  question_type_info(kind).map(|info| info.default_marks).unwrap_or(1)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
  pub id: String,
  pub name: String,
  pub subject: String,
}

/// Runtime catalog: subjects per class and the topic list. Both can be
/// replaced from the TOML config.
#[derive(Clone, Debug)]
pub struct Catalog {
  pub subjects_by_class: BTreeMap<Class, Vec<String>>,
  pub topics: Vec<Topic>,
}

impl Default for Catalog {
  fn default() -> Self {
    Self { subjects_by_class: seed_subjects_by_class(), topics: seed_topics() }
  }
}

impl Catalog {
  pub fn subjects_for(&self, class: Class) -> &[String] {
    self.subjects_by_class.get(&class).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn offers_subject(&self, class: Class, subject: &str) -> bool {
    self.subjects_for(class).iter().any(|s| s == subject)
  }

  pub fn topics_for<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Topic> + 'a {
    self.topics.iter().filter(move |t| t.subject == subject)
  }
}

pub fn seed_subjects_by_class() -> BTreeMap<Class, Vec<String>> {
  let junior = ["Mathematics", "Science", "English", "Social Studies"];
  let middle = ["Mathematics", "Science", "English", "Social Studies", "Computer Science"];
  let senior = ["Physics", "Chemistry", "Mathematics", "Biology", "Computer Science"];

  let owned = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
  Class::ALL
    .iter()
    .map(|&class| {
      let subjects = match class {
        Class::Class5 | Class::Class6 | Class::Class7 | Class::Class8 => owned(&junior[..]),
        Class::Class9 | Class::Class10 => owned(&middle[..]),
        Class::Class11 | Class::Class12 => owned(&senior[..]),
      };
      (class, subjects)
    })
    .collect()
}

/// Sample topics so the wizard is usable without any config file.
pub fn seed_topics() -> Vec<Topic> {
  [
    ("1", "Cell Biology", "Biology"),
    ("2", "Newton's Laws", "Physics"),
    ("3", "Quadratic Equations", "Mathematics"),
    ("4", "States of Matter", "Chemistry"),
    ("5", "American Revolution", "History"),
    ("6", "Programming Fundamentals", "Computer Science"),
  ]
  .into_iter()
  .map(|(id, name, subject)| Topic { id: id.into(), name: name.into(), subject: subject.into() })
  .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_names_cover_canonical_types_and_echo_unknown() {
    assert_eq!(display_name(&QuestionType::Mcq), "Multiple Choice");
    assert_eq!(display_name(&QuestionType::FillInBlanks), "Fill in the Blanks");
    assert_eq!(display_name(&QuestionType::from("essay")), "essay");
  }

  #[test]
  fn default_marks_follow_table() {
    assert_eq!(default_marks(&QuestionType::ShortAnswer), 3);
    assert_eq!(default_marks(&QuestionType::LongAnswer), 5);
    assert_eq!(default_marks(&QuestionType::from("essay")), 1);
  }

  #[test]
  fn seed_subjects_are_keyed_by_every_class() {
    let catalog = Catalog::default();
    for class in Class::ALL {
      assert!(!catalog.subjects_for(class).is_empty(), "{class} has no subjects");
    }
    assert!(catalog.offers_subject(Class::Class9, "Computer Science"));
    assert!(!catalog.offers_subject(Class::Class5, "Computer Science"));
    assert!(catalog.offers_subject(Class::Class12, "Physics"));
  }

  #[test]
  fn topics_filter_by_subject() {
    let catalog = Catalog::default();
    let names: Vec<_> = catalog.topics_for("Physics").map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Newton's Laws"]);
    assert_eq!(catalog.topics_for("Art").count(), 0);
  }
}
