//! The SAE editing session.
//!
//! One session edits one record for one patient. Collaborators are passed
//! in explicitly; nothing here reads ambient state.
//!
//! Precedence between the three sources of clinical values is fixed:
//! user edits > prior-record prefill > live patient data. Prefill is
//! applied at most once and only before the first user interaction;
//! patient updates only ever fill blank fields.

use sae_core::merge;
use sae_core::models::{
    AssessmentRecord, ClinicalField, CodeList, CreateSaeRequest, PatientSnapshot,
    PriorAssessment, SaePayload,
};
use sae_core::reconcile::{reconcile_fields_form, SourceKind};
use sae_core::resolver::find_applicable;
use sae_core::validation::validate_complete;
use sae_core::wizard::{Advance, Step, WizardCursor};
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::failure::SaveFailure;
use crate::identity::Operator;
use crate::patient_store::PatientStore;
use crate::repository::SaeRepository;

/// Seed a fresh record from the patient snapshot and the operator.
pub fn initialize_record(patient: &PatientSnapshot, operator: &Operator) -> AssessmentRecord {
    AssessmentRecord {
        clinical: reconcile_fields_form(&patient.fields, SourceKind::Patient),
        coren: operator.coren.clone(),
        responsible_nurse: operator.nurse_name.clone(),
        ..Default::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefill {
    Pending,
    Applied,
    Skipped,
}

pub struct SaeSession<R, S> {
    repository: R,
    store: S,
    patient_id: String,
    triage_id: Option<String>,
    cursor: WizardCursor,
    record: AssessmentRecord,
    prefill: Prefill,
    interacted: bool,
    submitted: Option<String>,
}

impl<R: SaeRepository, S: PatientStore> SaeSession<R, S> {
    /// Open a session for `patient_id`.
    ///
    /// Seeds the record from the patient snapshot, then prefills it from
    /// the applicable prior record, if any. `triage_id` overrides the
    /// patient's current encounter.
    pub fn open(
        repository: R,
        store: S,
        patient_id: &str,
        triage_id: Option<String>,
        operator: &Operator,
    ) -> Result<Self, SessionError> {
        let patient = store
            .patient(patient_id)
            .ok_or_else(|| SessionError::PatientNotFound(patient_id.to_string()))?;

        let triage_id = triage_id.or_else(|| patient.triage_id.clone());
        let record = initialize_record(patient, operator);
        let prior = find_applicable(&patient.sae_history, triage_id.as_deref()).cloned();

        info!(
            patient_id,
            triage_id = triage_id.as_deref().unwrap_or(""),
            history_len = patient.sae_history.len(),
            "SAE session opened"
        );

        let mut session = SaeSession {
            repository,
            store,
            patient_id: patient_id.to_string(),
            triage_id,
            cursor: WizardCursor::new(),
            record,
            prefill: Prefill::Pending,
            interacted: false,
            submitted: None,
        };

        match prior {
            Some(prior) => {
                session.apply_previous_record(&prior);
            }
            None => session.prefill = Prefill::Skipped,
        }

        Ok(session)
    }

    pub fn record(&self) -> &AssessmentRecord {
        &self.record
    }

    pub fn triage_id(&self) -> Option<&str> {
        self.triage_id.as_deref()
    }

    pub fn step(&self) -> Step {
        self.cursor.step()
    }

    pub fn progress(&self) -> f32 {
        self.cursor.progress()
    }

    pub fn is_editing_existing(&self) -> bool {
        self.record.previous_record_id.is_some()
    }

    /// Server id of the saved record, once submitted.
    pub fn submitted_id(&self) -> Option<&str> {
        self.submitted.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply a user edit to the record.
    pub fn edit(&mut self, f: impl FnOnce(&mut AssessmentRecord)) {
        self.interacted = true;
        f(&mut self.record);
    }

    pub fn set_clinical(&mut self, field: ClinicalField, value: impl Into<String>) {
        let value = value.into();
        self.edit(|record| *record.clinical.get_mut(field) = value);
    }

    /// Toggle a code in one of the classification lists. Returns whether the
    /// code is selected afterwards.
    pub fn toggle_code(&mut self, list: CodeList, code: &str) -> bool {
        self.interacted = true;
        self.record.toggle_code(list, code)
    }

    /// Re-derive clinical values from an updated patient snapshot, filling
    /// only fields that are still blank. Returns the fields written.
    pub fn reconcile_on_patient_change(&mut self, patient: &PatientSnapshot) -> Vec<ClinicalField> {
        let derived = reconcile_fields_form(&patient.fields, SourceKind::Patient);
        let written = merge::fill_blank(&mut self.record.clinical, &derived);
        debug!(
            patient_id = %self.patient_id,
            filled = written.len(),
            "merged patient snapshot into blank fields"
        );
        written
    }

    /// Prefill the record from a prior assessment.
    ///
    /// Applied at most once, and only before the first user interaction;
    /// later calls are ignored and return `false`. The prior record's lists,
    /// narrative and identity fields are copied verbatim, and its non-blank
    /// clinical values overlay the patient-derived ones. When the prior
    /// record belongs to the current encounter the session switches to
    /// updating that record instead of creating a new one.
    pub fn apply_previous_record(&mut self, prior: &PriorAssessment) -> bool {
        if self.prefill == Prefill::Applied || self.interacted {
            debug!(
                prior_id = %prior.id,
                interacted = self.interacted,
                "prior record prefill skipped"
            );
            return false;
        }

        merge::adopt_prior(&mut self.record, prior);
        let prior_clinical = reconcile_fields_form(&prior.clinical, SourceKind::Sae);
        let overlaid = merge::overlay_present(&mut self.record.clinical, &prior_clinical);

        let same_encounter = match (&self.triage_id, &prior.triage_id) {
            (None, _) => true,
            (Some(current), Some(tagged)) => current == tagged,
            (Some(_), None) => false,
        };
        if same_encounter {
            self.record.previous_record_id = Some(prior.id.clone());
        }

        self.prefill = Prefill::Applied;
        info!(
            prior_id = %prior.id,
            same_encounter,
            clinical_fields = overlaid.len(),
            "prior record applied"
        );
        true
    }

    /// Move to the next step if the current one validates.
    ///
    /// At the last step this returns [`Advance::Finish`]; the caller then
    /// runs [`SaeSession::submit`].
    pub fn next(&mut self) -> Advance {
        let outcome = self.cursor.advance(&self.record);
        if let Advance::Blocked { step, message } = &outcome {
            debug!(step = step.number(), message = %message, "step advance blocked");
        }
        outcome
    }

    /// Move back one step. No-op at step 1.
    pub fn previous(&mut self) -> bool {
        self.cursor.retreat()
    }

    /// Validate and persist the record.
    ///
    /// Validation failures never reach the persistence service. On success
    /// the saved record's summary is appended to the patient history and
    /// the server id is returned. A session saves at most once.
    pub async fn submit(&mut self) -> Result<String, SessionError> {
        if let Some(id) = &self.submitted {
            return Err(SessionError::AlreadySubmitted(id.clone()));
        }

        let check = validate_complete(&self.record);
        if !check.ok {
            warn!(
                patient_id = %self.patient_id,
                errors = check.errors.len(),
                "SAE submission failed validation"
            );
            return Err(SessionError::Validation(check.errors));
        }

        let payload = SaePayload::from(&self.record);
        let result = match self.record.previous_record_id.as_deref() {
            Some(existing) => self.repository.update(existing, payload.clone()).await,
            None => {
                let request = CreateSaeRequest {
                    paciente_id: self.patient_id.clone(),
                    triagem_id: self.triage_id.clone(),
                    sae: payload.clone(),
                };
                self.repository.create(request).await
            }
        };

        let saved = match result {
            Ok(saved) => saved,
            Err(err) => {
                let failure = SaveFailure::from(&err);
                warn!(
                    patient_id = %self.patient_id,
                    error = %err,
                    normalized = %failure.error,
                    "SAE persistence failed"
                );
                return Err(SessionError::Persistence(failure));
            }
        };

        let summary = PriorAssessment::from_saved(
            saved.id.clone(),
            self.triage_id.clone(),
            &payload,
            jiff::Timestamp::now(),
        )?;
        self.store.append_assessment(&self.patient_id, summary);
        self.submitted = Some(saved.id.clone());

        info!(
            patient_id = %self.patient_id,
            record_id = %saved.id,
            updated = self.record.previous_record_id.is_some(),
            "SAE saved"
        );
        Ok(saved.id)
    }
}
