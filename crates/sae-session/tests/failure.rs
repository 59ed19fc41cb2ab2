use sae_session::failure::{normalize, SaveFailure, CONNECTION_MESSAGE, GENERIC_MESSAGE};
use sae_session::RepositoryError;
use serde_json::json;

fn rejected(body: serde_json::Value) -> RepositoryError {
    RepositoryError::Rejected {
        status: 400,
        body: Some(body),
    }
}

#[test]
fn server_validation_list_takes_priority() {
    let err = rejected(json!({
        "errors": ["Campo obrigatório", { "msg": "COREN inválido" }, { "message": "Data inválida" }],
        "message": "Bad Request",
    }));
    assert_eq!(
        normalize(&err),
        "Campo obrigatório, COREN inválido, Data inválida"
    );
}

#[test]
fn server_message_used_when_no_list() {
    assert_eq!(normalize(&rejected(json!({ "message": "SAE já existe" }))), "SAE já existe");
    assert_eq!(normalize(&rejected(json!({ "error": "Não autorizado" }))), "Não autorizado");
    assert_eq!(
        normalize(&rejected(json!({ "errors": [], "message": "Falhou" }))),
        "Falhou"
    );
}

#[test]
fn own_message_used_when_not_network_related() {
    let err = RepositoryError::Other("Paciente arquivado".to_string());
    assert_eq!(normalize(&err), "Paciente arquivado");
}

#[test]
fn network_failures_get_connection_message() {
    for err in [
        RepositoryError::Transport(String::new()),
        RepositoryError::Transport("Network Error".to_string()),
        RepositoryError::Other("request timed out".to_string()),
    ] {
        assert_eq!(normalize(&err), CONNECTION_MESSAGE, "{err:?}");
    }
}

#[test]
fn unknown_shapes_fall_back_to_generic_message() {
    for err in [
        RepositoryError::Rejected {
            status: 500,
            body: None,
        },
        rejected(json!("plain text body")),
        rejected(json!({ "errors": [1, null, {}], "message": 42 })),
        RepositoryError::Other("   ".to_string()),
    ] {
        assert_eq!(normalize(&err), GENERIC_MESSAGE, "{err:?}");
    }
}

#[test]
fn rejection_status_line_is_never_shown() {
    let err = RepositoryError::Rejected {
        status: 503,
        body: Some(json!({ "errors": [] })),
    };
    let message = normalize(&err);
    assert_eq!(message, GENERIC_MESSAGE);
    assert!(!message.contains("503"));
}

#[test]
fn save_failure_serializes_as_unsuccessful() {
    let failure = SaveFailure::from(&RepositoryError::Other("x".to_string()));
    assert_eq!(
        serde_json::to_value(failure).unwrap(),
        json!({ "success": false, "error": "x" })
    );
}
