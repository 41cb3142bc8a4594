//! Generation config and its conversion from a loosely-typed JSON object.
//!
//! Script callers hand over plain objects whose values may be numbers,
//! numeric strings, booleans or anything else a script can produce. Every
//! recognized property is coerced the way a JavaScript host would coerce
//! it, unknown properties are ignored, and a missing `seed` is replaced by
//! the current time in nanoseconds.

use crate::error::{AlertGenError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Effective configuration handed to a [`crate::generator::Generator`].
///
/// Serializes with the same property names callers use on input, so the
/// `inputConfig` echoed back can be fed straight into another call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Number of alerting rules to generate
    #[serde(rename = "alertRuleCount")]
    pub num_alerting: i64,

    /// Number of recording rules to generate
    #[serde(rename = "recordingRuleCount")]
    pub num_recording: i64,

    /// Datasource UID used by rule queries
    #[serde(rename = "queryDatasource")]
    pub query_datasource: String,

    /// Datasource UID recording rules write to
    #[serde(rename = "writeDatasource")]
    pub write_datasource: String,

    #[serde(rename = "rulesPerGroup")]
    pub rules_per_group: i64,

    #[serde(rename = "groupsPerFolder")]
    pub groups_per_folder: i64,

    /// RNG seed; the same seed reproduces the same groups
    pub seed: i64,
}

impl GenerateConfig {
    /// Build a config from a script object, seeding from the clock when
    /// `seed` is absent.
    pub fn from_value(raw: &Value) -> Result<Self> {
        Self::from_value_with_seed(raw, time_seed)
    }

    /// Build a config from a script object, calling `default_seed` only
    /// when the object carries no usable `seed`.
    pub fn from_value_with_seed(raw: &Value, default_seed: impl FnOnce() -> i64) -> Result<Self> {
        // Non-object values behave like an object with no own properties.
        let raw_config = if raw.is_object() {
            RawGenerateConfig::deserialize(raw)
                .map_err(|e| AlertGenError::InvalidConfig(e.to_string()))?
        } else {
            RawGenerateConfig::default()
        };

        Ok(raw_config.resolve(default_seed))
    }

    /// Total number of rules this config asks for
    pub fn total_rules(&self) -> i64 {
        self.num_alerting.saturating_add(self.num_recording)
    }
}

/// The script object as received. `None` means absent or `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGenerateConfig {
    #[serde(default, deserialize_with = "integer")]
    alert_rule_count: Option<i64>,
    #[serde(default, deserialize_with = "integer")]
    recording_rule_count: Option<i64>,
    #[serde(default, deserialize_with = "string")]
    query_datasource: Option<String>,
    #[serde(default, deserialize_with = "string")]
    write_datasource: Option<String>,
    #[serde(default, deserialize_with = "integer")]
    rules_per_group: Option<i64>,
    #[serde(default, deserialize_with = "integer")]
    groups_per_folder: Option<i64>,
    #[serde(default, deserialize_with = "seed")]
    seed: Option<i64>,
}

impl RawGenerateConfig {
    fn resolve(self, default_seed: impl FnOnce() -> i64) -> GenerateConfig {
        GenerateConfig {
            num_alerting: self.alert_rule_count.unwrap_or_default(),
            num_recording: self.recording_rule_count.unwrap_or_default(),
            query_datasource: self.query_datasource.unwrap_or_default(),
            write_datasource: self.write_datasource.unwrap_or_default(),
            rules_per_group: self.rules_per_group.unwrap_or_default(),
            groups_per_folder: self.groups_per_folder.unwrap_or_default(),
            seed: self.seed.unwrap_or_else(default_seed),
        }
    }
}

/// Current wall-clock time in nanoseconds since the Unix epoch.
pub fn time_seed() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_nanos() as i64,
        Err(e) => -(e.duration().as_nanos() as i64),
    }
}

fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<i64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok((!value.is_null()).then(|| to_integer(&value)))
}

fn string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok((!value.is_null()).then(|| to_js_string(&value)))
}

fn seed<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<i64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let seed = match &value {
        Value::Null => None,
        // Integral strings keep full 64-bit precision.
        Value::String(s) => Some(s.trim().parse::<i64>().unwrap_or_else(|_| to_integer(&value))),
        _ => Some(to_integer(&value)),
    };
    Ok(seed)
}

/// ToNumber followed by truncation toward zero. NaN becomes 0 and
/// out-of-range values saturate.
pub(crate) fn to_integer(value: &Value) -> i64 {
    if let Some(n) = value.as_i64() {
        return n;
    }
    let number = to_number(value);
    if number.is_nan() { 0 } else { number.trunc() as i64 }
}

fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => string_to_number(s),
        Value::Array(_) => to_number(&Value::String(to_js_string(value))),
        Value::Object(_) => f64::NAN,
    }
}

/// Numeric string grammar: decimal literals, signed `Infinity`, and unsigned
/// `0x`/`0o`/`0b` integers. Anything else is NaN.
fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits
            .chars()
            .try_fold(0.0_f64, |acc, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            })
            .unwrap_or(f64::NAN);
    }

    // Rust also accepts "inf", "infinity" and "nan"
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// ToString as a JavaScript host would apply it.
pub(crate) fn to_js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                return n.to_string();
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
                    format!("{:.0}", f)
                }
                _ => n.to_string(),
            }
        }
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixed_seed() -> i64 {
        7
    }

    #[test]
    fn test_full_config() {
        let raw = json!({
            "alertRuleCount": 20,
            "recordingRuleCount": 30,
            "queryDatasource": "query_ds_id",
            "writeDatasource": "write_ds_id",
            "rulesPerGroup": 4,
            "groupsPerFolder": 5,
            "seed": 42
        });

        let config = GenerateConfig::from_value_with_seed(&raw, fixed_seed).unwrap();
        assert_eq!(
            config,
            GenerateConfig {
                num_alerting: 20,
                num_recording: 30,
                query_datasource: "query_ds_id".to_string(),
                write_datasource: "write_ds_id".to_string(),
                rules_per_group: 4,
                groups_per_folder: 5,
                seed: 42,
            }
        );
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let config = GenerateConfig::from_value_with_seed(&json!({}), fixed_seed).unwrap();
        assert_eq!(config.num_alerting, 0);
        assert_eq!(config.num_recording, 0);
        assert_eq!(config.query_datasource, "");
        assert_eq!(config.write_datasource, "");
        assert_eq!(config.rules_per_group, 0);
        assert_eq!(config.groups_per_folder, 0);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_null_fields_are_treated_as_missing() {
        let raw = json!({"alertRuleCount": null, "queryDatasource": null, "seed": null});
        let config = GenerateConfig::from_value_with_seed(&raw, fixed_seed).unwrap();
        assert_eq!(config.num_alerting, 0);
        assert_eq!(config.query_datasource, "");
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_explicit_seed_is_kept() {
        for seed in [0_i64, -1, 42, i64::MAX, i64::MIN] {
            let config =
                GenerateConfig::from_value_with_seed(&json!({ "seed": seed }), || unreachable!())
                    .unwrap();
            assert_eq!(config.seed, seed);
        }
    }

    #[test]
    fn test_seed_from_string_keeps_precision() {
        let raw = json!({"seed": "9007199254740993"});
        let config = GenerateConfig::from_value_with_seed(&raw, fixed_seed).unwrap();
        assert_eq!(config.seed, 9_007_199_254_740_993);
    }

    #[test]
    fn test_time_seed_used_when_absent() {
        let config = GenerateConfig::from_value(&json!({"alertRuleCount": 1})).unwrap();
        assert_ne!(config.seed, 0);
    }

    #[test]
    fn test_counts_are_truncated() {
        let raw = json!({
            "alertRuleCount": 2.9,
            "recordingRuleCount": -1.5,
            "rulesPerGroup": "3",
            "groupsPerFolder": true
        });
        let config = GenerateConfig::from_value_with_seed(&raw, fixed_seed).unwrap();
        assert_eq!(config.num_alerting, 2);
        assert_eq!(config.num_recording, -1);
        assert_eq!(config.rules_per_group, 3);
        assert_eq!(config.groups_per_folder, 1);
    }

    #[test]
    fn test_non_numeric_counts_become_zero() {
        let raw = json!({
            "alertRuleCount": "many",
            "recordingRuleCount": {"n": 1},
            "rulesPerGroup": "",
            "groupsPerFolder": [4]
        });
        let config = GenerateConfig::from_value_with_seed(&raw, fixed_seed).unwrap();
        assert_eq!(config.num_alerting, 0);
        assert_eq!(config.num_recording, 0);
        assert_eq!(config.rules_per_group, 0);
        assert_eq!(config.groups_per_folder, 4);
    }

    #[test]
    fn test_numeric_string_grammar() {
        let cases = [
            ("inf", 0),
            ("nan", 0),
            ("infinity", 0),
            ("Infinity", i64::MAX),
            (" -Infinity ", i64::MIN),
            ("0x10", 16),
            ("0XfF", 255),
            ("0o17", 15),
            ("0b101", 5),
            ("-0x10", 0),
            ("0x", 0),
            ("0b102", 0),
            ("1e3", 1000),
            ("-2.5", -2),
            (".5", 0),
            ("\n 12 \t", 12),
        ];
        for (input, expected) in cases {
            let config =
                GenerateConfig::from_value_with_seed(&json!({ "alertRuleCount": input }), fixed_seed)
                    .unwrap();
            assert_eq!(config.num_alerting, expected, "{input:?}");
        }
    }

    #[test]
    fn test_datasources_are_stringified() {
        let raw = json!({"queryDatasource": 42, "writeDatasource": 3.0});
        let config = GenerateConfig::from_value_with_seed(&raw, fixed_seed).unwrap();
        assert_eq!(config.query_datasource, "42");
        assert_eq!(config.write_datasource, "3");

        assert_eq!(to_js_string(&json!(true)), "true");
        assert_eq!(to_js_string(&json!(1.5)), "1.5");
        assert_eq!(to_js_string(&json!(["a", null, 1])), "a,,1");
        assert_eq!(to_js_string(&json!({"uid": "x"})), "[object Object]");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let base = json!({"alertRuleCount": 3, "seed": 1});
        let extended = json!({
            "alertRuleCount": 3,
            "seed": 1,
            "nuke": true,
            "grafanaURL": "http://localhost:3000"
        });

        let a = GenerateConfig::from_value_with_seed(&base, fixed_seed).unwrap();
        let b = GenerateConfig::from_value_with_seed(&extended, fixed_seed).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_object_yields_defaults() {
        let config = GenerateConfig::from_value_with_seed(&json!(12), fixed_seed).unwrap();
        assert_eq!(config.num_alerting, 0);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_serializes_with_external_names() {
        let config = GenerateConfig::from_value_with_seed(&json!({"alertRuleCount": 1}), fixed_seed)
            .unwrap();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            json!({
                "alertRuleCount": 1,
                "recordingRuleCount": 0,
                "queryDatasource": "",
                "writeDatasource": "",
                "rulesPerGroup": 0,
                "groupsPerFolder": 0,
                "seed": 7
            })
        );
    }
}
