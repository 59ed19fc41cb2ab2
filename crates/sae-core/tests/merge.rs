use sae_core::merge::{adopt_prior, fill_blank, overlay_present};
use sae_core::models::{AssessmentRecord, ClinicalField, ClinicalSnapshot, PriorAssessment};

fn snapshot(pairs: &[(ClinicalField, &str)]) -> ClinicalSnapshot<String> {
    let mut s = ClinicalSnapshot::<String>::default();
    for (field, value) in pairs {
        *s.get_mut(*field) = value.to_string();
    }
    s
}

#[test]
fn fill_blank_never_overwrites() {
    let mut live = snapshot(&[(ClinicalField::BloodPressure, "140/90")]);
    let fallback = snapshot(&[
        (ClinicalField::BloodPressure, "120/80"),
        (ClinicalField::Weight, "70"),
    ]);

    let written = fill_blank(&mut live, &fallback);

    assert_eq!(written, vec![ClinicalField::Weight]);
    assert_eq!(live.blood_pressure, "140/90");
    assert_eq!(live.weight, "70");
}

#[test]
fn fill_blank_ignores_blank_fallback_values() {
    let mut live = snapshot(&[]);
    let written = fill_blank(&mut live, &snapshot(&[]));
    assert!(written.is_empty());
}

#[test]
fn overlay_present_replaces_only_with_non_blank() {
    let mut live = snapshot(&[
        (ClinicalField::BloodPressure, "140/90"),
        (ClinicalField::HeartRate, "80"),
    ]);
    let prior = snapshot(&[(ClinicalField::BloodPressure, "120/80")]);

    let written = overlay_present(&mut live, &prior);

    assert_eq!(written, vec![ClinicalField::BloodPressure]);
    assert_eq!(live.blood_pressure, "120/80");
    assert_eq!(live.heart_rate, "80");
}

#[test]
fn adopt_prior_copies_lists_and_narrative() {
    let prior = PriorAssessment {
        id: "sae-1".to_string(),
        nursing_diagnoses: vec!["00132".to_string(), "00046".to_string()],
        nursing_interventions: vec!["1400".to_string()],
        expected_outcomes: vec!["2102".to_string()],
        evolution: "Paciente estável".to_string(),
        observations: "Sem intercorrências".to_string(),
        coren: "SP-123456".to_string(),
        responsible_nurse: "Ana Souza".to_string(),
        ..Default::default()
    };
    let mut record = AssessmentRecord {
        coren: "RJ-1".to_string(),
        ..Default::default()
    };

    adopt_prior(&mut record, &prior);

    assert_eq!(record.nursing_diagnoses, prior.nursing_diagnoses);
    assert_eq!(record.nursing_interventions, prior.nursing_interventions);
    assert_eq!(record.expected_outcomes, prior.expected_outcomes);
    assert_eq!(record.evolution, "Paciente estável");
    assert_eq!(record.observations, "Sem intercorrências");
    assert_eq!(record.coren, "SP-123456");
    assert_eq!(record.responsible_nurse, "Ana Souza");
    assert_eq!(record.previous_record_id, None);
}
