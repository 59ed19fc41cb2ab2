use std::collections::HashMap;

use sae_core::models::{PatientSnapshot, PriorAssessment};
use tracing::warn;

/// Read access to patients and their SAE history, plus the one mutation
/// the session needs: appending the summary of a freshly saved record.
pub trait PatientStore {
    fn patient(&self, patient_id: &str) -> Option<&PatientSnapshot>;

    fn append_assessment(&mut self, patient_id: &str, summary: PriorAssessment);
}

impl<T: PatientStore + ?Sized> PatientStore for &mut T {
    fn patient(&self, patient_id: &str) -> Option<&PatientSnapshot> {
        (**self).patient(patient_id)
    }

    fn append_assessment(&mut self, patient_id: &str, summary: PriorAssessment) {
        (**self).append_assessment(patient_id, summary)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryPatientStore {
    patients: HashMap<String, PatientSnapshot>,
}

impl InMemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, patient: PatientSnapshot) {
        self.patients.insert(patient.id.clone(), patient);
    }
}

impl PatientStore for InMemoryPatientStore {
    fn patient(&self, patient_id: &str) -> Option<&PatientSnapshot> {
        self.patients.get(patient_id)
    }

    fn append_assessment(&mut self, patient_id: &str, summary: PriorAssessment) {
        match self.patients.get_mut(patient_id) {
            Some(patient) => patient.sae_history.push(summary),
            None => warn!(patient_id, "cannot append assessment to unknown patient"),
        }
    }
}
