use sae_core::models::{ClinicalField, ClinicalSnapshot};
use sae_core::reconcile::{
    aliases, coerce_text, reconcile, reconcile_form, to_form, SourceKind, WRAPPER_KEYS,
};
use serde_json::{json, Value};

#[test]
fn absent_source_yields_empty_form() {
    let form = reconcile_form(None, SourceKind::Patient);
    assert_eq!(form, ClinicalSnapshot::<String>::default());
    assert_eq!(form.blank_fields().len(), 9);
}

#[test]
fn absent_source_yields_null_raw_snapshot() {
    let raw = reconcile(None, SourceKind::Backend);
    assert!(raw.iter().all(|(_, v)| v.is_none()));
}

#[test]
fn non_object_source_is_treated_as_absent() {
    for source in [json!("120/80"), json!(42), json!([1, 2, 3]), Value::Null] {
        let form = reconcile_form(Some(&source), SourceKind::Backend);
        assert_eq!(form, ClinicalSnapshot::<String>::default());
    }
}

#[test]
fn every_alias_resolves_to_canonical_field() {
    for field in ClinicalField::ALL {
        for alias in aliases(field) {
            let source = match alias.split_once('.') {
                Some((wrapper, key)) => json!({ wrapper: { key: "v" } }),
                None => json!({ alias.as_str(): "v" }),
            };
            let form = reconcile_form(Some(&source), SourceKind::Backend);
            assert_eq!(form.get(field), "v", "alias {alias} for {field:?}");
            let others = ClinicalField::ALL.iter().filter(|f| **f != field);
            for other in others {
                assert_eq!(form.get(*other), "", "alias {alias} leaked into {other:?}");
            }
        }
    }
}

#[test]
fn flat_aliases_precede_nested_ones() {
    for field in ClinicalField::ALL {
        let list = aliases(field);
        let first_nested = list.iter().position(|a| a.contains('.')).unwrap();
        assert!(list[..first_nested].iter().all(|a| !a.contains('.')));
        assert!(list[first_nested..].iter().all(|a| a.contains('.')));
        assert!(list[first_nested..].iter().all(|a| {
            WRAPPER_KEYS.iter().any(|w| a.starts_with(&format!("{w}.")))
        }));
    }
}

#[test]
fn highest_priority_alias_wins_on_conflict() {
    let source = json!({
        "pressao_arterial": "130/90",
        "bloodPressure": "120/80",
        "dados_clinicos": { "bloodPressure": "110/70" },
    });
    let form = reconcile_form(Some(&source), SourceKind::Patient);
    assert_eq!(form.blood_pressure, "120/80");

    let source = json!({
        "dadosClinicos": { "peso": 70 },
        "dados_clinicos": { "peso": 72 },
    });
    let form = reconcile_form(Some(&source), SourceKind::Sae);
    assert_eq!(form.weight, "72");
}

#[test]
fn null_values_fall_through_to_next_alias() {
    let source = json!({
        "heartRate": null,
        "dados_clinicos": { "frequencia_cardiaca": 88 },
    });
    let raw = reconcile(Some(&source), SourceKind::Sae);
    assert_eq!(raw.heart_rate, Some(json!(88)));
}

#[test]
fn empty_string_is_a_present_value() {
    let source = json!({
        "temperature": "",
        "dados_clinicos": { "temperature": "37.5" },
    });
    let form = reconcile_form(Some(&source), SourceKind::Backend);
    assert_eq!(form.temperature, "");
}

#[test]
fn malformed_wrapper_fails_soft() {
    let source = json!({
        "dados_clinicos": "not an object",
        "dadosClinicos": { "sintomas": "cefaleia" },
    });
    let form = reconcile_form(Some(&source), SourceKind::Backend);
    assert_eq!(form.symptoms, "cefaleia");
    assert_eq!(form.blood_pressure, "");
}

#[test]
fn nesting_is_only_one_level_deep() {
    let source = json!({
        "dados_clinicos": { "dados_clinicos": { "peso": 80 } },
    });
    let form = reconcile_form(Some(&source), SourceKind::Backend);
    assert_eq!(form.weight, "");
}

#[test]
fn form_coercion_stringifies_values() {
    let source = json!({
        "peso": 72.5,
        "altura": 180,
        "sintomas": ["tosse", "febre"],
        "historico_medico": true,
    });
    let form = reconcile_form(Some(&source), SourceKind::Patient);
    assert_eq!(form.weight, "72.5");
    assert_eq!(form.height, "180");
    assert_eq!(form.symptoms, "tosse,febre");
    assert_eq!(form.medical_history, "true");
}

#[test]
fn whole_valued_floats_drop_the_fraction() {
    assert_eq!(coerce_text(&json!(37.0)), "37");
    assert_eq!(coerce_text(&json!(-2.0)), "-2");
    assert_eq!(coerce_text(&json!(36.6)), "36.6");

    let form = reconcile_form(Some(&json!({ "temperatura": 37.0 })), SourceKind::Patient);
    assert_eq!(form.temperature, "37");
}

#[test]
fn form_coercion_is_idempotent() {
    let values = [
        json!(null),
        json!(""),
        json!("120/80"),
        json!(98.6),
        json!(37.0),
        json!(false),
        json!([1, "a", null]),
        json!({ "nested": 1 }),
    ];
    for value in values {
        let once = coerce_text(&value);
        let twice = coerce_text(&Value::String(once.clone()));
        assert_eq!(once, twice, "coercion of {value} is not idempotent");
    }

    let raw = reconcile(Some(&json!({ "peso": 70, "altura": "1.80" })), SourceKind::Patient);
    let form = to_form(&raw);
    let again = to_form(&form.map(|_, v| Some(Value::String(v.clone()))));
    assert_eq!(form, again);
}
