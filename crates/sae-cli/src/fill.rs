//! Drive a whole session from a patient file and a set of answers.

use sae_core::wizard::{Advance, Step};
use sae_session::{Operator, PatientStore, SaeRepository, SaeSession, SessionError};
use tracing::info;

use crate::answers::FormAnswers;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillReport {
    Saved { id: String, updated: bool },
    Blocked { step: Step, message: String },
}

/// Open a session, replay `answers`, walk the wizard and submit.
///
/// Stops at the first step that fails validation without contacting the
/// repository.
pub async fn run_fill<R: SaeRepository, S: PatientStore>(
    repository: R,
    store: S,
    patient_id: &str,
    triage_id: Option<String>,
    operator: &Operator,
    answers: &FormAnswers,
) -> Result<FillReport, SessionError> {
    let mut session = SaeSession::open(repository, store, patient_id, triage_id, operator)?;
    answers.apply(&mut session);

    loop {
        match session.next() {
            Advance::Moved(step) => {
                info!(step = step.number(), title = step.title(), "step completed");
            }
            Advance::Blocked { step, message } => {
                return Ok(FillReport::Blocked { step, message });
            }
            Advance::Finish => break,
        }
    }

    let updated = session.is_editing_existing();
    let id = session.submit().await?;
    Ok(FillReport::Saved { id, updated })
}
