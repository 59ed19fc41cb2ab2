use crate::models::PriorAssessment;

/// Pick the prior record used to prefill a new assessment.
///
/// Prefers the most recent record of `encounter`; falls back to the most
/// recent record overall. With no encounter, every record matches.
pub fn find_applicable<'a>(
    history: &'a [PriorAssessment],
    encounter: Option<&str>,
) -> Option<&'a PriorAssessment> {
    let Some(encounter) = encounter else {
        return history.last();
    };

    history
        .iter()
        .rev()
        .find(|record| record.triage_id.as_deref() == Some(encounter))
        .or_else(|| history.last())
}
