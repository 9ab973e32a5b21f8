//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Topic, QUESTION_TYPES};
use crate::domain::{Board, Class, DifficultyLevel, ExamType, PaperConfig, PaperType, QuestionTypeDistribution, SpecificExamType};
use crate::validation::{FieldErrors, WizardStep};
use crate::wizard::{WizardAction, WizardState};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Validate {
        config: PaperConfig,
        step: u8,
    },
    GenerateInstructions {
        #[serde(rename = "questionTypes")]
        question_types: Vec<QuestionTypeDistribution>,
    },
    StartWizard,
    GetWizard {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    WizardAction {
        #[serde(rename = "sessionId")]
        session_id: String,
        action: WizardAction,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Validation(ValidationOut),
    Instructions {
        instructions: String,
    },
    Wizard {
        wizard: WizardOut,
    },
    Error {
        message: String,
    },
}

/// Session snapshot as the UI sees it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardOut {
    pub session_id: String,
    pub step: WizardStep,
    pub step_label: &'static str,
    pub config: PaperConfig,
    pub errors: FieldErrors,
    pub submitted: bool,
}

/// Convert a wizard snapshot (internal) to the public DTO.
pub fn to_out(session_id: &str, w: &WizardState) -> WizardOut {
    WizardOut {
        session_id: session_id.to_string(),
        step: w.step,
        step_label: w.step.label(),
        config: w.config.clone(),
        errors: w.errors.clone(),
        submitted: w.submitted,
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct ValidateIn {
    pub config: PaperConfig,
    /// Raw step index; range-checked by the handler so it reports `InvalidStep`.
    pub step: u8,
}
#[derive(Debug, Serialize)]
pub struct ValidationOut {
    pub valid: bool,
    pub errors: FieldErrors,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionsIn {
    pub question_types: Vec<QuestionTypeDistribution>,
}
#[derive(Debug, Serialize)]
pub struct InstructionsOut {
    pub instructions: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionTypeOut {
    pub value: String,
    pub label: &'static str,
    pub default_marks: i64,
}

#[derive(Debug, Serialize)]
pub struct ClassOut {
    pub class: Class,
    pub subjects: Vec<String>,
}

/// Everything the form needs to populate its option lists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOut {
    pub exam_types: Vec<ExamType>,
    pub boards: Vec<Board>,
    pub classes: Vec<ClassOut>,
    pub specific_exam_types: Vec<SpecificExamType>,
    pub paper_types: Vec<PaperType>,
    pub difficulty_levels: Vec<DifficultyLevel>,
    pub question_types: Vec<QuestionTypeOut>,
    pub topics: Vec<Topic>,
    pub steps: Vec<&'static str>,
}

pub fn catalog_out(catalog: &Catalog) -> CatalogOut {
    CatalogOut {
        exam_types: vec![ExamType::School, ExamType::Entrance, ExamType::SchoolEntrance, ExamType::Olympiads],
        boards: vec![Board::Cbse, Board::Icse, Board::StateBoard],
        classes: catalog
            .subjects_by_class
            .iter()
            .map(|(class, subjects)| ClassOut { class: *class, subjects: subjects.clone() })
            .collect(),
        specific_exam_types: vec![
            SpecificExamType::UnitTest,
            SpecificExamType::BoardExam,
            SpecificExamType::Practice,
            SpecificExamType::Mock,
            SpecificExamType::TopicTest,
        ],
        paper_types: vec![PaperType::Objective, PaperType::Subjective, PaperType::Mixed],
        difficulty_levels: vec![
            DifficultyLevel::Easy,
            DifficultyLevel::Moderate,
            DifficultyLevel::Hard,
            DifficultyLevel::Random,
            DifficultyLevel::Custom,
        ],
        question_types: QUESTION_TYPES
            .iter()
            .map(|info| QuestionTypeOut {
                value: info.kind.id().to_string(),
                label: info.label,
                default_marks: info.default_marks,
            })
            .collect(),
        topics: catalog.topics.clone(),
        steps: [
            WizardStep::BasicInfo,
            WizardStep::PaperDetails,
            WizardStep::QuestionTypes,
            WizardStep::Difficulty,
            WizardStep::FinalDetails,
        ]
        .iter()
        .map(|s| s.label())
        .collect(),
    }
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub sessions: usize,
}
