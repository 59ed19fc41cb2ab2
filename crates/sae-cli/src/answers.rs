use std::path::Path;

use sae_core::models::{AssessmentRecord, CodeList};
use sae_core::reconcile::{reconcile_form, SourceKind};
use sae_session::{PatientStore, SaeRepository, SaeSession};
use serde::Deserialize;
use serde_json::Value;

/// What a nurse typed into the form, as loaded from a JSON file.
///
/// Clinical values may use any of the recognised key spellings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormAnswers {
    #[serde(alias = "dados_clinicos", alias = "dadosClinicos")]
    pub clinical: Value,
    #[serde(alias = "nursingDiagnoses", alias = "diagnosticos")]
    pub diagnoses: Vec<String>,
    #[serde(alias = "nursingInterventions", alias = "intervencoes")]
    pub interventions: Vec<String>,
    #[serde(alias = "expectedOutcomes", alias = "resultados_esperados")]
    pub outcomes: Vec<String>,
    #[serde(alias = "evolucao")]
    pub evolution: Option<String>,
    #[serde(alias = "observacoes")]
    pub observations: Option<String>,
    pub coren: Option<String>,
    #[serde(alias = "responsibleNurse", alias = "enfermeiro_responsavel")]
    pub responsible_nurse: Option<String>,
}

impl FormAnswers {
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read answers at {}: {e}", path.display()))?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn code_lists(&self) -> [(CodeList, &[String]); 3] {
        [
            (CodeList::Diagnoses, self.diagnoses.as_slice()),
            (CodeList::Interventions, self.interventions.as_slice()),
            (CodeList::Outcomes, self.outcomes.as_slice()),
        ]
    }

    /// Replay the answers as user edits on a session.
    ///
    /// Non-blank clinical values overwrite; codes already selected stay
    /// selected; narrative fields are replaced only when given.
    pub fn apply<R: SaeRepository, S: PatientStore>(&self, session: &mut SaeSession<R, S>) {
        let clinical = reconcile_form(Some(&self.clinical), SourceKind::Backend);
        for (field, value) in clinical.iter() {
            if !value.is_empty() {
                session.set_clinical(field, value.clone());
            }
        }

        for (list, codes) in self.code_lists() {
            for code in codes {
                if !session.record().codes(list).contains(code) {
                    session.toggle_code(list, code);
                }
            }
        }

        session.edit(|record| self.apply_text(record));
    }

    /// Build a standalone record from the answers alone.
    pub fn to_record(&self) -> AssessmentRecord {
        let mut record = AssessmentRecord {
            clinical: reconcile_form(Some(&self.clinical), SourceKind::Backend),
            ..Default::default()
        };
        for (list, codes) in self.code_lists() {
            *record.codes_mut(list) = codes.to_vec();
        }
        self.apply_text(&mut record);
        record
    }

    fn apply_text(&self, record: &mut AssessmentRecord) {
        let text_fields = [
            (&self.evolution, &mut record.evolution),
            (&self.observations, &mut record.observations),
            (&self.coren, &mut record.coren),
            (&self.responsible_nurse, &mut record.responsible_nurse),
        ];
        for (answer, slot) in text_fields {
            if let Some(answer) = answer {
                *slot = answer.clone();
            }
        }
    }
}
