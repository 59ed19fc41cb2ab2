use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::clinical::ClinicalSnapshot;

/// The working state of one in-progress SAE.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct AssessmentRecord {
    pub clinical: ClinicalSnapshot<String>,
    /// Selected NANDA diagnosis codes, in selection order.
    pub nursing_diagnoses: Vec<String>,
    /// Selected NIC intervention codes, in selection order.
    pub nursing_interventions: Vec<String>,
    /// Selected NOC outcome codes, in selection order.
    pub expected_outcomes: Vec<String>,
    pub evolution: String,
    pub observations: String,
    /// Professional registration number (COREN) of the submitting nurse.
    pub coren: String,
    pub responsible_nurse: String,
    /// Set only when this session continues an already-saved assessment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_record_id: Option<String>,
}

/// The three classification lists a nurse selects codes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CodeList {
    Diagnoses,
    Interventions,
    Outcomes,
}

impl AssessmentRecord {
    pub fn codes(&self, list: CodeList) -> &[String] {
        match list {
            CodeList::Diagnoses => &self.nursing_diagnoses,
            CodeList::Interventions => &self.nursing_interventions,
            CodeList::Outcomes => &self.expected_outcomes,
        }
    }

    pub fn codes_mut(&mut self, list: CodeList) -> &mut Vec<String> {
        match list {
            CodeList::Diagnoses => &mut self.nursing_diagnoses,
            CodeList::Interventions => &mut self.nursing_interventions,
            CodeList::Outcomes => &mut self.expected_outcomes,
        }
    }

    /// Select `code` if absent, deselect it if present.
    ///
    /// Remaining selections keep their order. Returns whether the code is
    /// selected afterwards.
    pub fn toggle_code(&mut self, list: CodeList, code: &str) -> bool {
        let codes = self.codes_mut(list);
        if let Some(pos) = codes.iter().position(|c| c == code) {
            codes.remove(pos);
            false
        } else {
            codes.push(code.to_string());
            true
        }
    }
}
