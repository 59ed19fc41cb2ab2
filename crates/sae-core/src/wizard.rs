//! Wizard steps and the navigation cursor.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::AssessmentRecord;
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Step {
    ClinicalData,
    Diagnoses,
    Interventions,
    Outcomes,
    Evolution,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::ClinicalData,
        Step::Diagnoses,
        Step::Interventions,
        Step::Outcomes,
        Step::Evolution,
    ];

    pub const COUNT: u8 = 5;

    /// 1-based step number.
    pub fn number(self) -> u8 {
        match self {
            Step::ClinicalData => 1,
            Step::Diagnoses => 2,
            Step::Interventions => 3,
            Step::Outcomes => 4,
            Step::Evolution => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Step::ClinicalData),
            2 => Some(Step::Diagnoses),
            3 => Some(Step::Interventions),
            4 => Some(Step::Outcomes),
            5 => Some(Step::Evolution),
            _ => None,
        }
    }

    /// Header title shown for this step.
    pub fn title(self) -> &'static str {
        match self {
            Step::ClinicalData => "Dados Clínicos",
            Step::Diagnoses => "Diagnósticos de Enfermagem",
            Step::Interventions => "Intervenções de Enfermagem",
            Step::Outcomes => "Resultados Esperados",
            Step::Evolution => "Evolução",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }
}

impl TryFrom<u8> for Step {
    type Error = CoreError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Step::from_number(n).ok_or(CoreError::InvalidStep(n))
    }
}

/// Result of asking the cursor to move forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved to this step.
    Moved(Step),
    /// The current step failed validation; the cursor did not move.
    Blocked { step: Step, message: String },
    /// The last step passed; the caller should run the finish operation.
    Finish,
}

/// Current position in the five-step wizard. Starts at step 1 and only
/// moves one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardCursor {
    step: Step,
}

impl Default for WizardCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardCursor {
    pub fn new() -> Self {
        WizardCursor {
            step: Step::ClinicalData,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Fraction of the wizard reached, in `(0, 1]`.
    pub fn progress(&self) -> f32 {
        f32::from(self.step.number()) / f32::from(Step::COUNT)
    }

    pub fn advance(&mut self, record: &AssessmentRecord) -> Advance {
        let check = validation::check(self.step, record);
        if !check.ok {
            return Advance::Blocked {
                step: self.step,
                message: check.message.unwrap_or_default(),
            };
        }

        match self.step.next() {
            Some(next) => {
                self.step = next;
                Advance::Moved(next)
            }
            None => Advance::Finish,
        }
    }

    /// Move back one step. Returns `false` (and stays put) at step 1.
    pub fn retreat(&mut self) -> bool {
        match self.step.previous() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }
}
