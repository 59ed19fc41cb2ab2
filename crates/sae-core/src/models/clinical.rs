use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One of the nine canonical clinical attributes produced by reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ClinicalField {
    BloodPressure,
    HeartRate,
    Temperature,
    RespiratoryRate,
    OxygenSaturation,
    Weight,
    Height,
    Symptoms,
    MedicalHistory,
}

impl ClinicalField {
    pub const ALL: [ClinicalField; 9] = [
        ClinicalField::BloodPressure,
        ClinicalField::HeartRate,
        ClinicalField::Temperature,
        ClinicalField::RespiratoryRate,
        ClinicalField::OxygenSaturation,
        ClinicalField::Weight,
        ClinicalField::Height,
        ClinicalField::Symptoms,
        ClinicalField::MedicalHistory,
    ];

    /// The canonical (camelCase) key this field is stored under.
    pub fn key(self) -> &'static str {
        match self {
            ClinicalField::BloodPressure => "bloodPressure",
            ClinicalField::HeartRate => "heartRate",
            ClinicalField::Temperature => "temperature",
            ClinicalField::RespiratoryRate => "respiratoryRate",
            ClinicalField::OxygenSaturation => "oxygenSaturation",
            ClinicalField::Weight => "weight",
            ClinicalField::Height => "height",
            ClinicalField::Symptoms => "symptoms",
            ClinicalField::MedicalHistory => "medicalHistory",
        }
    }
}

/// Vital signs and symptoms under their canonical keys.
///
/// The value type depends on the target: the form works with
/// `ClinicalSnapshot<String>` (empty string when absent), while raw
/// reconciliation produces `ClinicalSnapshot<Option<serde_json::Value>>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClinicalSnapshot<V> {
    pub blood_pressure: V,
    pub heart_rate: V,
    pub temperature: V,
    pub respiratory_rate: V,
    pub oxygen_saturation: V,
    pub weight: V,
    pub height: V,
    pub symptoms: V,
    pub medical_history: V,
}

impl<V> ClinicalSnapshot<V> {
    /// Build a snapshot by computing each field in canonical order.
    pub fn from_fn(mut f: impl FnMut(ClinicalField) -> V) -> Self {
        ClinicalSnapshot {
            blood_pressure: f(ClinicalField::BloodPressure),
            heart_rate: f(ClinicalField::HeartRate),
            temperature: f(ClinicalField::Temperature),
            respiratory_rate: f(ClinicalField::RespiratoryRate),
            oxygen_saturation: f(ClinicalField::OxygenSaturation),
            weight: f(ClinicalField::Weight),
            height: f(ClinicalField::Height),
            symptoms: f(ClinicalField::Symptoms),
            medical_history: f(ClinicalField::MedicalHistory),
        }
    }

    pub fn get(&self, field: ClinicalField) -> &V {
        match field {
            ClinicalField::BloodPressure => &self.blood_pressure,
            ClinicalField::HeartRate => &self.heart_rate,
            ClinicalField::Temperature => &self.temperature,
            ClinicalField::RespiratoryRate => &self.respiratory_rate,
            ClinicalField::OxygenSaturation => &self.oxygen_saturation,
            ClinicalField::Weight => &self.weight,
            ClinicalField::Height => &self.height,
            ClinicalField::Symptoms => &self.symptoms,
            ClinicalField::MedicalHistory => &self.medical_history,
        }
    }

    pub fn get_mut(&mut self, field: ClinicalField) -> &mut V {
        match field {
            ClinicalField::BloodPressure => &mut self.blood_pressure,
            ClinicalField::HeartRate => &mut self.heart_rate,
            ClinicalField::Temperature => &mut self.temperature,
            ClinicalField::RespiratoryRate => &mut self.respiratory_rate,
            ClinicalField::OxygenSaturation => &mut self.oxygen_saturation,
            ClinicalField::Weight => &mut self.weight,
            ClinicalField::Height => &mut self.height,
            ClinicalField::Symptoms => &mut self.symptoms,
            ClinicalField::MedicalHistory => &mut self.medical_history,
        }
    }

    /// Iterate over `(field, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ClinicalField, &V)> {
        ClinicalField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(ClinicalField, &V) -> U) -> ClinicalSnapshot<U> {
        ClinicalSnapshot::from_fn(|field| f(field, self.get(field)))
    }
}

impl ClinicalSnapshot<String> {
    /// Fields currently holding the empty-string sentinel.
    pub fn blank_fields(&self) -> Vec<ClinicalField> {
        self.iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(f, _)| f)
            .collect()
    }
}
