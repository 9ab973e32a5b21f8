//! Loading wizard configuration (paper defaults + catalog overrides) from TOML.
//!
//! See `WizardConfig` and `PaperDefaults` for expected schema. Every section is
//! optional; anything left out keeps the built-in value.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::catalog::{Catalog, Topic};
use crate::domain::{Class, CustomDifficulty, DifficultyLevel, PaperConfig, PaperType, SpecificExamType};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct WizardConfig {
  #[serde(default)]
  pub defaults: PaperDefaults,
  /// Replaces the built-in topic list when non-empty.
  #[serde(default)]
  pub topics: Vec<Topic>,
  /// Replaces the subjects of the listed classes only, keyed by label ("Class 9").
  #[serde(default)]
  pub subjects_by_class: BTreeMap<String, Vec<String>>,
}

/// Values a fresh wizard session starts from.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PaperDefaults {
  pub duration: u32,
  pub specific_exam_type: SpecificExamType,
  pub paper_type: PaperType,
  pub difficulty_level: DifficultyLevel,
  pub custom_difficulty: CustomDifficulty,
}

impl Default for PaperDefaults {
  fn default() -> Self {
    let base = PaperConfig::default();
    Self {
      duration: base.duration,
      specific_exam_type: base.specific_exam_type,
      paper_type: base.paper_type,
      difficulty_level: DifficultyLevel::Moderate,
      custom_difficulty: base.custom_difficulty,
    }
  }
}

impl PaperDefaults {
  pub fn initial_config(&self) -> PaperConfig {
    PaperConfig {
      duration: self.duration,
      specific_exam_type: self.specific_exam_type,
      paper_type: self.paper_type,
      difficulty_level: Some(self.difficulty_level),
      custom_difficulty: self.custom_difficulty,
      ..PaperConfig::default()
    }
  }
}

impl WizardConfig {
  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(s)
  }

  /// Built-in catalog with this config's overrides applied.
  pub fn catalog(&self) -> Catalog {
    let mut catalog = Catalog::default();
    if !self.topics.is_empty() {
      catalog.topics = self.topics.clone();
    }
    for (label, subjects) in &self.subjects_by_class {
      match Class::from_label(label) {
        Some(class) => {
          catalog.subjects_by_class.insert(class, subjects.clone());
        }
        None => warn!(target: "paper_wizard", %label, "Ignoring subjects for unknown class"),
      }
    }
    catalog
  }
}

/// Attempt to load `WizardConfig` from WIZARD_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_wizard_config_from_env() -> Option<WizardConfig> {
  let path = std::env::var("WIZARD_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match WizardConfig::from_toml_str(&s) {
      Ok(cfg) => {
        info!(target: "paper_wizard", %path, topics = cfg.topics.len(), class_overrides = cfg.subjects_by_class.len(), "Loaded wizard config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "paper_wizard", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "paper_wizard", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_toml_keeps_builtins() {
    let cfg = WizardConfig::from_toml_str("").expect("parse");
    let initial = cfg.defaults.initial_config();
    assert_eq!(initial, PaperConfig::default());
    assert_eq!(cfg.catalog().topics.len(), Catalog::default().topics.len());
  }

  #[test]
  fn overrides_apply_to_defaults_and_catalog() {
    let raw = r#"
[defaults]
duration = 90
paper_type = "Objective"
custom_difficulty = { easy = 50, moderate = 30, hard = 20 }

[[topics]]
id = "t1"
name = "Photosynthesis"
subject = "Science"

[subjects_by_class]
"Class 5" = ["Mathematics", "Environmental Studies"]
"#;
    let cfg = WizardConfig::from_toml_str(raw).expect("parse");
    let initial = cfg.defaults.initial_config();
    assert_eq!(initial.duration, 90);
    assert_eq!(initial.paper_type, PaperType::Objective);
    assert_eq!(initial.specific_exam_type, SpecificExamType::UnitTest);
    assert_eq!(initial.custom_difficulty.easy, 50);

    let catalog = cfg.catalog();
    assert_eq!(catalog.topics.len(), 1);
    assert!(catalog.offers_subject(Class::Class5, "Environmental Studies"));
    assert!(!catalog.offers_subject(Class::Class5, "English"));
    assert!(catalog.offers_subject(Class::Class6, "English"));
  }

  #[test]
  fn unknown_class_labels_are_skipped() {
    let cfg = WizardConfig::from_toml_str("[subjects_by_class]\n\"Class 13\" = [\"Astronomy\"]\n").expect("parse");
    let catalog = cfg.catalog();
    assert_eq!(catalog.subjects_by_class, Catalog::default().subjects_by_class);
  }

  #[test]
  fn unknown_enum_values_are_rejected() {
    assert!(WizardConfig::from_toml_str("[defaults]\npaper_type = \"Essay\"\n").is_err());
  }
}
