//! Clinical field reconciliation.
//!
//! Clinical values reach the wizard from three producers (patient intake,
//! prior SAE records, generic backend payloads), each spelling the keys its
//! own way and sometimes nesting them one level under a wrapper key. This
//! module maps any of those shapes onto the nine canonical fields.
//!
//! Every field is resolved by scanning a fixed, ordered list of alias keys:
//! flat keys first, then the same keys nested under each wrapper. The first
//! alias holding a present, non-null value wins.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{ClinicalField, ClinicalSnapshot};

/// Wrapper keys clinical values may be nested under, in priority order.
pub const WRAPPER_KEYS: [&str; 2] = ["dados_clinicos", "dadosClinicos"];

/// Where a record being reconciled came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Patient,
    Sae,
    Backend,
}

/// Flat alias keys per field, highest priority first.
const FLAT_ALIASES: [(ClinicalField, &[&str]); 9] = [
    (
        ClinicalField::BloodPressure,
        &["bloodPressure", "blood_pressure", "pressao_arterial", "pressaoArterial"],
    ),
    (
        ClinicalField::HeartRate,
        &["heartRate", "heart_rate", "frequencia_cardiaca", "frequenciaCardiaca"],
    ),
    (ClinicalField::Temperature, &["temperature", "temperatura"]),
    (
        ClinicalField::RespiratoryRate,
        &[
            "respiratoryRate",
            "respiratory_rate",
            "frequencia_respiratoria",
            "frequenciaRespiratoria",
        ],
    ),
    (
        ClinicalField::OxygenSaturation,
        &[
            "oxygenSaturation",
            "oxygen_saturation",
            "saturacao_oxigenio",
            "saturacaoOxigenio",
        ],
    ),
    (ClinicalField::Weight, &["weight", "peso"]),
    (ClinicalField::Height, &["height", "altura"]),
    (ClinicalField::Symptoms, &["symptoms", "sintomas"]),
    (
        ClinicalField::MedicalHistory,
        &[
            "medicalHistory",
            "medical_history",
            "historico_medico",
            "historicoMedico",
        ],
    ),
];

/// Full ordered alias list per field. Nested aliases are dotted
/// (`wrapper.key`) and denote exactly one level of nesting.
static ALIASES: LazyLock<Vec<(ClinicalField, Vec<String>)>> = LazyLock::new(|| {
    FLAT_ALIASES
        .iter()
        .map(|(field, flat)| {
            let mut keys: Vec<String> = flat.iter().map(|k| k.to_string()).collect();
            for wrapper in WRAPPER_KEYS {
                keys.extend(flat.iter().map(|k| format!("{wrapper}.{k}")));
            }
            (*field, keys)
        })
        .collect()
});

/// The ordered alias keys scanned for `field`.
pub fn aliases(field: ClinicalField) -> &'static [String] {
    ALIASES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, keys)| keys.as_slice())
        .unwrap_or(&[])
}

/// Resolve all nine canonical fields from an arbitrary JSON value.
///
/// Anything other than a JSON object (including `None`) resolves every
/// field to `None`. Never fails.
pub fn reconcile(source: Option<&Value>, kind: SourceKind) -> ClinicalSnapshot<Option<Value>> {
    match source.and_then(Value::as_object) {
        Some(map) => reconcile_fields(map, kind),
        None => ClinicalSnapshot::default(),
    }
}

/// Resolve all nine canonical fields from a keyed map.
pub fn reconcile_fields(map: &Map<String, Value>, kind: SourceKind) -> ClinicalSnapshot<Option<Value>> {
    let snapshot = ClinicalSnapshot::from_fn(|field| {
        aliases(field)
            .iter()
            .find_map(|alias| lookup(map, alias))
            .cloned()
    });

    debug!(
        source_kind = ?kind,
        resolved = snapshot.iter().filter(|(_, v)| v.is_some()).count(),
        "reconciled clinical fields"
    );

    snapshot
}

/// Reconcile straight into the form shape (every field a string).
pub fn reconcile_form(source: Option<&Value>, kind: SourceKind) -> ClinicalSnapshot<String> {
    to_form(&reconcile(source, kind))
}

/// Form-shaped reconciliation of a keyed map.
pub fn reconcile_fields_form(map: &Map<String, Value>, kind: SourceKind) -> ClinicalSnapshot<String> {
    to_form(&reconcile_fields(map, kind))
}

/// Coerce resolved values to their textual form. Absent values become `""`.
pub fn to_form(snapshot: &ClinicalSnapshot<Option<Value>>) -> ClinicalSnapshot<String> {
    snapshot.map(|_, v| v.as_ref().map(coerce_text).unwrap_or_default())
}

/// Textual representation of a JSON value as shown in a form input.
///
/// Lossy and idempotent: coercing the text of an already coerced value
/// yields the same text.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::Array(items) => items.iter().map(coerce_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Whole-valued floats print without a trailing `.0` (`37.0` is "37").
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// Look up a (possibly dotted) alias. Missing or non-object intermediates
/// and explicit nulls are treated as not found.
pub(crate) fn lookup<'a>(map: &'a Map<String, Value>, alias: &str) -> Option<&'a Value> {
    let value = match alias.split_once('.') {
        Some((wrapper, key)) => map.get(wrapper)?.as_object()?.get(key)?,
        None => map.get(alias)?,
    };
    (!value.is_null()).then_some(value)
}
