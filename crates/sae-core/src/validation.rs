//! Completion rules for the five wizard steps.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::AssessmentRecord;
use crate::wizard::Step;

pub const DIAGNOSIS_REQUIRED: &str =
    "Selecione pelo menos um diagnóstico de enfermagem (NANDA) para continuar.";
pub const INTERVENTION_REQUIRED: &str =
    "Selecione pelo menos uma intervenção de enfermagem (NIC) para continuar.";
pub const INVALID_STEP: &str = "Etapa inválida.";

/// Outcome of checking a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StepCheck {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StepCheck {
    pub fn pass() -> Self {
        StepCheck {
            ok: true,
            message: None,
        }
    }

    pub fn fail(message: &str) -> Self {
        StepCheck {
            ok: false,
            message: Some(message.to_string()),
        }
    }
}

/// Outcome of the final, step-independent completeness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompletenessCheck {
    pub ok: bool,
    pub errors: Vec<String>,
}

/// Check whether `step` (1-5) is complete enough to move past.
///
/// Clinical data, expected outcomes and evolution are optional. Diagnoses
/// and interventions need at least one selected code.
pub fn validate_step(step: u8, record: &AssessmentRecord) -> StepCheck {
    match Step::from_number(step) {
        Some(step) => check(step, record),
        None => StepCheck::fail(INVALID_STEP),
    }
}

/// Typed variant of [`validate_step`].
pub fn check(step: Step, record: &AssessmentRecord) -> StepCheck {
    match step {
        Step::ClinicalData | Step::Outcomes | Step::Evolution => StepCheck::pass(),
        Step::Diagnoses if record.nursing_diagnoses.is_empty() => {
            StepCheck::fail(DIAGNOSIS_REQUIRED)
        }
        Step::Interventions if record.nursing_interventions.is_empty() => {
            StepCheck::fail(INTERVENTION_REQUIRED)
        }
        Step::Diagnoses | Step::Interventions => StepCheck::pass(),
    }
}

/// Gate for final submission, regardless of which steps were visited.
pub fn validate_complete(record: &AssessmentRecord) -> CompletenessCheck {
    let mut errors = Vec::new();
    if record.nursing_diagnoses.is_empty() {
        errors.push(DIAGNOSIS_REQUIRED.to_string());
    }
    if record.nursing_interventions.is_empty() {
        errors.push(INTERVENTION_REQUIRED.to_string());
    }
    CompletenessCheck {
        ok: errors.is_empty(),
        errors,
    }
}
