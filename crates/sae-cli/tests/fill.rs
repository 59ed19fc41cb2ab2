use sae_cli::answers::FormAnswers;
use sae_cli::fill::{run_fill, FillReport};
use sae_cli::outbox::OutboxRepository;
use sae_core::models::PatientSnapshot;
use sae_core::validation::DIAGNOSIS_REQUIRED;
use sae_core::wizard::Step;
use sae_session::{InMemoryPatientStore, Operator, PatientStore};
use serde_json::json;

fn operator() -> Operator {
    Operator {
        coren: "SP-000001".to_string(),
        nurse_name: "Operadora".to_string(),
    }
}

fn store(patient: serde_json::Value) -> InMemoryPatientStore {
    let mut store = InMemoryPatientStore::new();
    store.insert(serde_json::from_value::<PatientSnapshot>(patient).unwrap());
    store
}

fn answers(value: serde_json::Value) -> FormAnswers {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn fill_creates_record_in_outbox() {
    let dir = tempfile::tempdir().unwrap();
    let repo = OutboxRepository::new(dir.path());
    let mut store = store(json!({
        "id": "p-1",
        "triagemId": "t-1",
        "pressao_arterial": "120/80",
    }));
    let answers = answers(json!({
        "dados_clinicos": { "temperatura": 37.8 },
        "diagnosticos": ["00132"],
        "intervencoes": ["1400", "2210"],
        "evolucao": "Paciente refere dor 6/10",
    }));

    let report = run_fill(&repo, &mut store, "p-1", None, &operator(), &answers)
        .await
        .unwrap();

    let FillReport::Saved { id, updated } = report.clone() else {
        panic!("expected saved report, got {report:?}");
    };
    assert!(!updated);

    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(repo.path_for(&id)).unwrap()).unwrap();
    assert_eq!(written["paciente_id"], "p-1");
    assert_eq!(written["triagem_id"], "t-1");
    assert_eq!(written["dados_clinicos"]["bloodPressure"], "120/80");
    assert_eq!(written["dados_clinicos"]["temperature"], "37.8");
    assert_eq!(written["intervencoes"], json!(["1400", "2210"]));
    assert_eq!(written["coren"], "SP-000001");

    let history = &store.patient("p-1").unwrap().sae_history;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, id);
}

#[tokio::test]
async fn fill_stops_at_first_blocked_step() {
    let dir = tempfile::tempdir().unwrap();
    let repo = OutboxRepository::new(dir.path().join("outbox"));
    let store = store(json!({ "id": "p-1" }));

    let report = run_fill(&repo, store, "p-1", None, &operator(), &FormAnswers::default())
        .await
        .unwrap();

    assert_eq!(
        report,
        FillReport::Blocked {
            step: Step::Diagnoses,
            message: DIAGNOSIS_REQUIRED.to_string(),
        }
    );
    assert!(!dir.path().join("outbox").exists());
}

#[tokio::test]
async fn fill_updates_prior_record_of_same_encounter() {
    let dir = tempfile::tempdir().unwrap();
    let repo = OutboxRepository::new(dir.path());
    let store = store(json!({
        "id": "p-1",
        "triagemId": "t-1",
        "saes": [{
            "_id": "sae-1",
            "triagemId": "t-1",
            "diagnosticos": ["00132"],
            "intervencoes": ["1400"],
        }],
    }));
    let answers = answers(json!({ "diagnosticos": ["00132", "00046"] }));

    let report = run_fill(&repo, store, "p-1", None, &operator(), &answers)
        .await
        .unwrap();

    assert_eq!(
        report,
        FillReport::Saved {
            id: "sae-1".to_string(),
            updated: true,
        }
    );
    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(repo.path_for("sae-1")).unwrap()).unwrap();
    assert_eq!(written["diagnosticos"], json!(["00132", "00046"]));
    assert_eq!(written["sae_anterior_id"], "sae-1");
}

#[test]
fn answers_build_standalone_record() {
    let record = answers(json!({
        "clinical": { "bloodPressure": "110/70" },
        "nursingDiagnoses": ["00132"],
        "observacoes": "Alergia a dipirona",
    }))
    .to_record();

    assert_eq!(record.clinical.blood_pressure, "110/70");
    assert_eq!(record.nursing_diagnoses, vec!["00132"]);
    assert!(record.nursing_interventions.is_empty());
    assert_eq!(record.observations, "Alergia a dipirona");
}
