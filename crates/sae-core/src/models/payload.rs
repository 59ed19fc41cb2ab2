use serde::{Deserialize, Serialize};

use super::clinical::ClinicalSnapshot;
use super::record::AssessmentRecord;

/// Persistence shape of an SAE: clinical values grouped under one wrapper
/// key, lists and narrative fields as siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaePayload {
    pub dados_clinicos: ClinicalSnapshot<String>,
    pub diagnosticos: Vec<String>,
    pub intervencoes: Vec<String>,
    pub resultados_esperados: Vec<String>,
    pub evolucao: String,
    pub observacoes: String,
    pub coren: String,
    pub enfermeiro_responsavel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sae_anterior_id: Option<String>,
}

impl From<&AssessmentRecord> for SaePayload {
    fn from(record: &AssessmentRecord) -> Self {
        SaePayload {
            dados_clinicos: record.clinical.clone(),
            diagnosticos: record.nursing_diagnoses.clone(),
            intervencoes: record.nursing_interventions.clone(),
            resultados_esperados: record.expected_outcomes.clone(),
            evolucao: record.evolution.clone(),
            observacoes: record.observations.clone(),
            coren: record.coren.clone(),
            enfermeiro_responsavel: record.responsible_nurse.clone(),
            sae_anterior_id: record.previous_record_id.clone(),
        }
    }
}

/// Body of a "create new" call: the payload plus patient and encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSaeRequest {
    pub paciente_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triagem_id: Option<String>,
    #[serde(flatten)]
    pub sae: SaePayload,
}
