//! Merge rules used when prefilling a record.
//!
//! Precedence is: user edits > prior-record prefill > live patient data.
//! Patient data only ever fills blanks; prior-record values overlay
//! whatever the patient seeded, and are applied before the user touches
//! the form.

use crate::models::{AssessmentRecord, ClinicalField, ClinicalSnapshot, PriorAssessment};

/// Fill each blank field of `live` from `fallback`.
///
/// Non-blank fields are never overwritten. Returns the fields written.
pub fn fill_blank(
    live: &mut ClinicalSnapshot<String>,
    fallback: &ClinicalSnapshot<String>,
) -> Vec<ClinicalField> {
    let mut written = Vec::new();
    for field in ClinicalField::ALL {
        let incoming = fallback.get(field);
        let slot = live.get_mut(field);
        if slot.is_empty() && !incoming.is_empty() {
            *slot = incoming.clone();
            written.push(field);
        }
    }
    written
}

/// Overlay each non-blank field of `prior` onto `live`.
///
/// Returns the fields written.
pub fn overlay_present(
    live: &mut ClinicalSnapshot<String>,
    prior: &ClinicalSnapshot<String>,
) -> Vec<ClinicalField> {
    let mut written = Vec::new();
    for (field, value) in prior.iter() {
        if !value.is_empty() {
            *live.get_mut(field) = value.clone();
            written.push(field);
        }
    }
    written
}

/// Copy the non-clinical parts of a prior record verbatim.
pub fn adopt_prior(record: &mut AssessmentRecord, prior: &PriorAssessment) {
    record.nursing_diagnoses = prior.nursing_diagnoses.clone();
    record.nursing_interventions = prior.nursing_interventions.clone();
    record.expected_outcomes = prior.expected_outcomes.clone();
    record.evolution = prior.evolution.clone();
    record.observations = prior.observations.clone();
    record.coren = prior.coren.clone();
    record.responsible_nurse = prior.responsible_nurse.clone();
}
