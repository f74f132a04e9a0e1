//! Rule-driven payload validation.
//!
//! A rule set is an ordered list of `(field, Rule)` pairs. Validation is
//! all-or-nothing: either every constraint passes and only the validated,
//! present keys are returned, or the full ordered error list comes back and
//! nothing is applied.

use serde_json::{Map, Number, Value};

/// Presence policy for a field. Create flows use `Required` for the mandatory
/// set; update flows mark every field `Sometimes` so absence is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Sometimes,
}

/// Value constraint applied when the field is present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    /// Any JSON string.
    Text,
    /// JSON number, or a string that parses as one. Normalized to a number.
    Numeric { min: Option<i64> },
    /// Whole JSON number, or a string that parses as one. Normalized to an
    /// integer; fractional values are rejected.
    Integer { min: Option<i64> },
    /// String containing a plausible email address.
    Email,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub presence: Presence,
    pub kind: Kind,
}

impl Rule {
    pub const fn required(kind: Kind) -> Self {
        Self { presence: Presence::Required, kind }
    }

    pub const fn sometimes(kind: Kind) -> Self {
        Self { presence: Presence::Sometimes, kind }
    }
}

/// Validated, present fields only. Numeric strings have been normalized to
/// JSON numbers.
pub type ValidatedFields = Map<String, Value>;

/// Validate `payload` against the ordered rule set.
///
/// Keys not named by a rule are ignored; `null` counts as absent.
pub fn validate(payload: &Value, rules: &[(&str, Rule)]) -> Result<ValidatedFields, Vec<String>> {
    let empty = Map::new();
    let object = payload.as_object().unwrap_or(&empty);

    let mut validated = Map::new();
    let mut errors = Vec::new();

    for (field, rule) in rules {
        let value = object.get(*field).filter(|v| !v.is_null());

        let value = match (value, rule.presence) {
            (Some(v), _) => v,
            (None, Presence::Required) => {
                errors.push(format!("The {} field is required.", field));
                continue;
            }
            (None, Presence::Sometimes) => continue,
        };

        match rule.kind {
            Kind::Text => match value.as_str() {
                Some(_) => {
                    validated.insert((*field).to_string(), value.clone());
                }
                None => errors.push(format!("The {} must be a string.", field)),
            },
            Kind::Numeric { min } => match numeric_value(value) {
                Some(number) => {
                    if let Some(min) = min {
                        let below = number
                            .as_f64()
                            .map(|n| n < min as f64)
                            .unwrap_or(false);
                        if below {
                            errors.push(format!("The {} must be at least {}.", field, min));
                            continue;
                        }
                    }
                    validated.insert((*field).to_string(), Value::Number(number));
                }
                None => errors.push(format!("The {} must be a number.", field)),
            },
            Kind::Integer { min } => match numeric_value(value).and_then(|n| n.as_i64()) {
                Some(i) => {
                    if let Some(min) = min {
                        if i < min {
                            errors.push(format!("The {} must be at least {}.", field, min));
                            continue;
                        }
                    }
                    validated.insert((*field).to_string(), Value::from(i));
                }
                None => errors.push(format!("The {} must be an integer.", field)),
            },
            Kind::Email => match value.as_str() {
                Some(s) if looks_like_email(s) => {
                    validated.insert((*field).to_string(), value.clone());
                }
                Some(_) => {
                    errors.push(format!("The {} must be a valid email address.", field))
                }
                None => errors.push(format!("The {} must be a string.", field)),
            },
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(errors)
    }
}

/// Accept JSON numbers as-is; numeric strings are parsed, preferring integers
/// so `"5"` stays `5` rather than becoming `5.0`.
fn numeric_value(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Some(Number::from(i));
            }
            s.parse::<f64>().ok().and_then(Number::from_f64)
        }
        _ => None,
    }
}

fn looks_like_email(s: &str) -> bool {
    let mut parts = s.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
