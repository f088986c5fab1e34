//! Comparison of a balance against a reference result in JSON form, as
//! produced by a known-good run or exported from the spreadsheet model.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as Json;

use crate::balance::{Balance, Value};

/// Absolute difference below which two numbers are always equal.
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Difference {
    pub path: String,
    pub actual: Json,
    pub expected: Json,
}

/// Outcome of [`compare`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Comparison {
    /// Paths present on both sides with different values.
    pub differences: Vec<Difference>,
    /// Paths of the balance the reference lacks.
    pub missing_in_reference: Vec<String>,
    /// Paths of the reference the balance lacks.
    pub missing_in_result: Vec<String>,
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        self.differences.is_empty()
            && self.missing_in_reference.is_empty()
            && self.missing_in_result.is_empty()
    }
}

fn flatten<'a>(prefix: String, json: &'a Json, out: &mut BTreeMap<String, &'a Json>) {
    match json {
        Json::Object(map) => {
            for (key, value) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(path, value, out);
            }
        }
        leaf => {
            out.insert(prefix, leaf);
        }
    }
}

fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
    let diff = (actual - expected).abs();
    diff <= EPSILON || diff <= tolerance * actual.abs().max(expected.abs())
}

fn to_json(value: Value) -> Json {
    match value {
        Value::Number(v) => serde_json::Number::from_f64(v).map_or(Json::Null, Json::Number),
        Value::Text(t) => Json::String(t.to_string()),
    }
}

/// Lists every field path whose value differs from `reference` by more than
/// the relative `tolerance`, and the paths found on one side only.
///
/// `reference` has the layout of a serialized [`Balance`]; its `ags` and
/// `year` entries are not compared.
pub fn compare(balance: &Balance, reference: &Json, tolerance: f64) -> Comparison {
    let mut expected = BTreeMap::new();
    flatten(String::new(), reference, &mut expected);
    expected.remove("ags");
    expected.remove("year");

    let mut result = Comparison::default();
    for (path, value) in balance.paths() {
        let Some(reference) = expected.remove(&path) else {
            result.missing_in_reference.push(path);
            continue;
        };
        let equal = match (value, reference) {
            (Value::Number(a), Json::Number(e)) => {
                e.as_f64().is_some_and(|e| close(a, e, tolerance))
            }
            (Value::Text(a), Json::String(e)) => a == e,
            _ => false,
        };
        if !equal {
            result.differences.push(Difference {
                path,
                actual: to_json(value),
                expected: reference.clone(),
            });
        }
    }
    result.missing_in_result = expected.into_keys().collect();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::y2030::testing;

    #[test]
    fn a_balance_matches_its_own_serialization() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");
        let json = serde_json::to_value(&b).expect("balance should serialize");

        let cmp = compare(&b, &json, 0.0);
        assert!(cmp.is_match(), "{cmp:?}");
    }

    #[test]
    fn deviations_beyond_the_tolerance_are_reported() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");
        let mut json = serde_json::to_value(&b).expect("balance should serialize");

        let energy = b.i30.i.energy;
        json["i30"]["i"]["energy"] = serde_json::json!(energy * 1.001);
        json["i30"]["i"]["bogus"] = serde_json::json!(1.0);
        if let Some(record) = json["e30"]["p"].as_object_mut() {
            record.remove("energy");
        }

        let loose = compare(&b, &json, 0.01);
        assert!(loose.differences.is_empty());
        let strict = compare(&b, &json, 1e-6);
        assert_eq!(strict.differences.len(), 1);
        assert_eq!(strict.differences[0].path, "i30.i.energy");
        assert_eq!(strict.missing_in_result, vec!["i30.i.bogus".to_string()]);
        assert_eq!(strict.missing_in_reference, vec!["e30.p.energy".to_string()]);
    }
}
