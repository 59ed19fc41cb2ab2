use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::payload::SaePayload;
use super::{id_text, take_first, text, text_list};
use crate::error::CoreError;

const PATIENT_ID_KEYS: &[&str] = &["id", "_id", "patientId", "paciente_id"];
const PRIOR_ID_KEYS: &[&str] = &["id", "_id"];
const TRIAGE_KEYS: &[&str] = &["triage_id", "triageId", "triagem_id", "triagemId"];
const HISTORY_KEYS: &[&str] = &["sae_history", "saes", "saeHistory"];
const DIAGNOSIS_KEYS: &[&str] = &[
    "nursing_diagnoses",
    "nursingDiagnoses",
    "diagnosticos",
    "diagnosticos_enfermagem",
];
const INTERVENTION_KEYS: &[&str] = &[
    "nursing_interventions",
    "nursingInterventions",
    "intervencoes",
    "intervencoes_enfermagem",
];
const OUTCOME_KEYS: &[&str] = &[
    "expected_outcomes",
    "expectedOutcomes",
    "resultados_esperados",
    "resultadosEsperados",
];
const EVOLUTION_KEYS: &[&str] = &["evolution", "evolucao"];
const OBSERVATION_KEYS: &[&str] = &["observations", "observacoes"];
const COREN_KEYS: &[&str] = &["coren"];
const NURSE_KEYS: &[&str] = &[
    "responsible_nurse",
    "responsibleNurse",
    "enfermeiro_responsavel",
    "enfermeiroResponsavel",
];
const CREATED_AT_KEYS: &[&str] = &["created_at", "createdAt"];

/// A patient as handed over by the patient store.
///
/// Only the identifiers and the SAE history are typed; everything else
/// (including clinical values under any key spelling) stays in `fields`
/// and is read through [`crate::reconcile`]. Each typed value may arrive
/// under several spellings; the first non-null one in priority order wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct PatientSnapshot {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triage_id: Option<String>,
    pub sae_history: Vec<PriorAssessment>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl PatientSnapshot {
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(text)?;
        match value {
            Value::Object(map) => Ok(PatientSnapshot::from(map)),
            _ => Err(CoreError::NotAnObject("patient snapshot")),
        }
    }
}

impl From<Map<String, Value>> for PatientSnapshot {
    fn from(mut fields: Map<String, Value>) -> Self {
        let id = take_first(&mut fields, PATIENT_ID_KEYS)
            .as_ref()
            .and_then(id_text)
            .unwrap_or_default();
        let triage_id = take_first(&mut fields, TRIAGE_KEYS).as_ref().and_then(id_text);

        let sae_history = match take_first(&mut fields, HISTORY_KEYS) {
            Some(Value::Array(entries)) => entries
                .into_iter()
                .enumerate()
                .filter_map(|(index, entry)| match entry {
                    Value::Object(map) => Some(PriorAssessment::from(map)),
                    other => {
                        warn!(
                            patient_id = %id,
                            index,
                            kind = value_kind(&other),
                            "skipping undecodable SAE history entry"
                        );
                        None
                    }
                })
                .collect(),
            Some(other) => {
                warn!(
                    patient_id = %id,
                    kind = value_kind(&other),
                    "SAE history is not a list, ignoring it"
                );
                Vec::new()
            }
            None => Vec::new(),
        };

        PatientSnapshot {
            id,
            triage_id,
            sae_history,
            fields,
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A previously completed SAE attached to a patient.
///
/// Records reach us from several producers, so identifiers and lists accept
/// camelCase, snake_case and Portuguese key spellings. Clinical values are
/// left in `clinical` for reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct PriorAssessment {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triage_id: Option<String>,
    pub nursing_diagnoses: Vec<String>,
    pub nursing_interventions: Vec<String>,
    pub expected_outcomes: Vec<String>,
    pub evolution: String,
    pub observations: String,
    pub coren: String,
    pub responsible_nurse: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<jiff::Timestamp>,
    #[serde(flatten)]
    pub clinical: Map<String, Value>,
}

impl From<Map<String, Value>> for PriorAssessment {
    fn from(mut clinical: Map<String, Value>) -> Self {
        let id = take_first(&mut clinical, PRIOR_ID_KEYS)
            .as_ref()
            .and_then(id_text)
            .unwrap_or_default();
        let created_at = match take_first(&mut clinical, CREATED_AT_KEYS) {
            Some(Value::String(raw)) => raw
                .parse::<jiff::Timestamp>()
                .inspect_err(|err| warn!(sae_id = %id, %err, "ignoring unparsable createdAt"))
                .ok(),
            _ => None,
        };

        PriorAssessment {
            triage_id: take_first(&mut clinical, TRIAGE_KEYS).as_ref().and_then(id_text),
            nursing_diagnoses: text_list(take_first(&mut clinical, DIAGNOSIS_KEYS)),
            nursing_interventions: text_list(take_first(&mut clinical, INTERVENTION_KEYS)),
            expected_outcomes: text_list(take_first(&mut clinical, OUTCOME_KEYS)),
            evolution: text(take_first(&mut clinical, EVOLUTION_KEYS)),
            observations: text(take_first(&mut clinical, OBSERVATION_KEYS)),
            coren: text(take_first(&mut clinical, COREN_KEYS)),
            responsible_nurse: text(take_first(&mut clinical, NURSE_KEYS)),
            created_at,
            id,
            clinical,
        }
    }
}

impl PriorAssessment {
    /// Local summary of a record the persistence service just accepted.
    pub fn from_saved(
        id: String,
        triage_id: Option<String>,
        payload: &SaePayload,
        created_at: jiff::Timestamp,
    ) -> Result<Self, CoreError> {
        let mut clinical = Map::new();
        clinical.insert(
            "dados_clinicos".to_string(),
            serde_json::to_value(&payload.dados_clinicos)?,
        );

        Ok(PriorAssessment {
            id,
            triage_id,
            nursing_diagnoses: payload.diagnosticos.clone(),
            nursing_interventions: payload.intervencoes.clone(),
            expected_outcomes: payload.resultados_esperados.clone(),
            evolution: payload.evolucao.clone(),
            observations: payload.observacoes.clone(),
            coren: payload.coren.clone(),
            responsible_nurse: payload.enfermeiro_responsavel.clone(),
            created_at: Some(created_at),
            clinical,
        })
    }
}
