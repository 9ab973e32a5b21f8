//! Paper instructions text generated from the question-type distribution.
//!
//! Output layout:
//!   1) header naming the sections and total question count
//!   2) one "Section X contains ..." line per active question type
//!   3) four fixed general instructions
//!   4) one extra numbered line per canonical type present, in catalog priority
//!
//! Pure and deterministic; an empty or all-zero distribution yields "".

use std::fmt::Write as _;

use tracing::{instrument, warn};

use crate::catalog::{display_name, QUESTION_TYPES};
use crate::domain::QuestionTypeDistribution;
use crate::util::plural;

const SECTION_LABELS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

const GENERAL_INSTRUCTIONS: [&str; 4] = [
  "Read the instructions for each section carefully.",
  "There is no overall choice in the question paper.",
  "Internal choices are provided in some questions where applicable.",
  "All questions are compulsory unless stated otherwise.",
];

/// Label for the section at `index`. The paper layout only defines A–F; past
/// that we keep going through the alphabet and then fall back to numbers.
fn section_label(index: usize) -> String {
  match SECTION_LABELS.get(index) {
    Some(label) => (*label).to_string(),
    None if index < 26 => char::from(b'A' + index as u8).to_string(),
    None => (index + 1).to_string(),
  }
}

#[instrument(level = "debug", skip_all, fields(entries = distribution.len()))]
pub fn generate_instructions(distribution: &[QuestionTypeDistribution]) -> String {
  let mut sections: Vec<&QuestionTypeDistribution> =
    distribution.iter().filter(|d| d.quantity > 0).collect();
  sections.sort_by(|a, b| a.kind.id().cmp(b.kind.id()));

  if sections.is_empty() {
    return String::new();
  }
  if sections.len() > SECTION_LABELS.len() {
    warn!(target: "wizard", sections = sections.len(), "More sections than the A-F layout defines; extending labels");
  }

  let labels: Vec<String> = (0..sections.len()).map(section_label).collect();
  let total_questions = sections.iter().fold(0i64, |acc, d| acc.saturating_add(d.quantity));

  let mut out = String::new();
  // Writing into a String cannot fail.
  let _ = write!(
    out,
    "This question paper contains {} {}: {}. There are {} questions in total. All sections are compulsory.\n\n",
    sections.len(),
    plural(sections.len() as i64, "section"),
    labels.join(", "),
    total_questions,
  );

  for (label, d) in labels.iter().zip(&sections) {
    let _ = writeln!(
      out,
      "Section {} contains {} {} {} of {} {} each.",
      label,
      d.quantity,
      display_name(&d.kind),
      plural(d.quantity, "question"),
      d.marks,
      plural(d.marks, "mark"),
    );
  }

  out.push_str("\nGeneral Instructions:\n");
  let mut number = 0usize;
  for line in GENERAL_INSTRUCTIONS {
    number += 1;
    let _ = writeln!(out, "{}. {}", number, line);
  }

  let mut specific: Vec<_> = QUESTION_TYPES
    .iter()
    .filter(|info| sections.iter().any(|d| d.kind == info.kind))
    .collect();
  specific.sort_by_key(|info| info.instruction_priority);
  for info in specific {
    number += 1;
    let _ = writeln!(out, "{}. {}", number, info.instruction);
  }

  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::QuestionType;

  fn scenario() -> Vec<QuestionTypeDistribution> {
    vec![
      QuestionTypeDistribution::new(QuestionType::Mcq, 5, 1),
      QuestionTypeDistribution::new(QuestionType::TrueFalse, 3, 1),
      QuestionTypeDistribution::new(QuestionType::ShortAnswer, 2, 3),
    ]
  }

  #[test]
  fn empty_or_zero_quantity_distribution_yields_empty_text() {
    assert_eq!(generate_instructions(&[]), "");
    let zero = [QuestionTypeDistribution::new(QuestionType::Mcq, 0, 1)];
    assert_eq!(generate_instructions(&zero), "");
  }

  #[test]
  fn generation_is_deterministic() {
    let input = scenario();
    assert_eq!(generate_instructions(&input), generate_instructions(&input));
  }

  #[test]
  fn mixed_paper_renders_full_block() {
    let text = generate_instructions(&scenario());
    let expected = "\
This question paper contains 3 sections: A, B, C. There are 10 questions in total. All sections are compulsory.

Section A contains 5 Multiple Choice questions of 1 mark each.
Section B contains 2 Short Answer questions of 3 marks each.
Section C contains 3 True/False questions of 1 mark each.

General Instructions:
1. Read the instructions for each section carefully.
2. There is no overall choice in the question paper.
3. Internal choices are provided in some questions where applicable.
4. All questions are compulsory unless stated otherwise.
5. For Multiple-choice Questions, choose the most appropriate answer.
6. For True/False questions, clearly mark your answer as either True or False.
7. Short-answer questions should be answered within the specified word limit.
";
    assert_eq!(text, expected);
  }

  #[test]
  fn single_section_uses_singular_forms() {
    let text = generate_instructions(&[QuestionTypeDistribution::new(QuestionType::LongAnswer, 1, 1)]);
    assert!(text.starts_with("This question paper contains 1 section: A. There are 1 questions in total."));
    assert!(text.contains("Section A contains 1 Long Answer question of 1 mark each."));
    assert!(text.ends_with(
      "5. Long Answer questions require detailed explanations with examples where applicable.\n"
    ));
    assert!(!text.contains("Multiple-choice"));
  }

  #[test]
  fn zero_quantity_rows_are_skipped_before_labelling() {
    let text = generate_instructions(&[
      QuestionTypeDistribution::new(QuestionType::FillInBlanks, 0, 1),
      QuestionTypeDistribution::new(QuestionType::LongAnswer, 2, 5),
    ]);
    assert!(text.contains("Section A contains 2 Long Answer questions of 5 marks each."));
    assert!(!text.contains("Fill"));
  }

  #[test]
  fn unknown_types_are_echoed_without_a_specific_line() {
    let text = generate_instructions(&[
      QuestionTypeDistribution::new("essay", 2, 10),
      QuestionTypeDistribution::new(QuestionType::FillInBlanks, 4, 1),
    ]);
    assert!(text.contains("Section A contains 2 essay questions of 10 marks each."));
    assert!(text.contains("Section B contains 4 Fill in the Blanks questions of 1 mark each."));
    assert!(text.ends_with("5. For Fill-in-the-blank, provide precise and concise answers.\n"));
  }

  #[test]
  fn labels_extend_past_six_sections() {
    let input: Vec<_> = ["a", "b", "c", "d", "e", "f", "g"]
      .iter()
      .map(|id| QuestionTypeDistribution::new(*id, 1, 1))
      .collect();
    let text = generate_instructions(&input);
    assert!(text.contains("7 sections: A, B, C, D, E, F, G."));
    assert!(text.contains("Section G contains 1 g question of 1 mark each."));
    assert_eq!(section_label(30), "31");
  }

  #[test]
  fn huge_quantities_saturate_the_total() {
    let input = [
      QuestionTypeDistribution::new(QuestionType::Mcq, i64::MAX, 1),
      QuestionTypeDistribution::new(QuestionType::TrueFalse, 1, 1),
    ];
    let text = generate_instructions(&input);
    assert!(text.contains(&format!("There are {} questions in total.", i64::MAX)));
    assert!(text.contains("Section B contains 1 True/False question of 1 mark each."));
  }

  #[test]
  fn uppercase_unknown_ids_sort_before_canonical_ones() {
    // Byte order: 'Z' (0x5A) sorts before every lowercase id.
    let input = [
      QuestionTypeDistribution::new(QuestionType::Mcq, 1, 1),
      QuestionTypeDistribution::new("Zed", 2, 4),
    ];
    let text = generate_instructions(&input);
    assert!(text.contains("Section A contains 2 Zed questions of 4 marks each."));
    assert!(text.contains("Section B contains 1 Multiple Choice question of 1 mark each."));
  }
}
