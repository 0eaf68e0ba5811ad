//! Attribute-typed wire values and their decoding into flat records.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Number, Value};

use super::record::Record;

/// One store-encoded item: attribute names paired with typed values, in store order.
pub type RawItem = Vec<(String, AttributeValue)>;

/// A typed attribute value as it travels on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    S(String),
    /// Numbers travel as decimal text.
    N(String),
    B(Vec<u8>),
    Bool(bool),
    Null,
    M(RawItem),
    L(Vec<AttributeValue>),
    Ss(Vec<String>),
    Ns(Vec<String>),
    Bs(Vec<Vec<u8>>),
}

impl AttributeValue {
    /// Decode into a plain JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            AttributeValue::S(s) => Value::String(s.clone()),
            AttributeValue::N(n) => number_value(n),
            AttributeValue::B(b) => Value::String(STANDARD.encode(b)),
            AttributeValue::Bool(b) => Value::Bool(*b),
            AttributeValue::Null => Value::Null,
            AttributeValue::M(fields) => Value::Object(unmarshall(fields)),
            AttributeValue::L(items) => Value::Array(items.iter().map(AttributeValue::to_value).collect()),
            AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
            AttributeValue::Ns(set) => Value::Array(set.iter().map(|n| number_value(n)).collect()),
            AttributeValue::Bs(set) => Value::Array(set.iter().map(|b| Value::String(STANDARD.encode(b))).collect()),
        }
    }
}

/// Decode a store-encoded item into a flat record, keeping attribute order.
pub fn unmarshall(item: &[(String, AttributeValue)]) -> Record {
    let mut record = Map::with_capacity(item.len());
    for (name, value) in item {
        record.insert(name.clone(), value.to_value());
    }
    record
}

/// Decimals with at most this many significant digits survive an f64 round trip.
const F64_EXACT_DIGITS: usize = 15;

/// Integral floats below this magnitude are exact in an f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

// Integers stay exact; decimals that f64 cannot hold exactly are kept as text.
fn number_value(text: &str) -> Value {
    let trimmed = text.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(u) = trimmed.parse::<u64>() {
        return Value::Number(u.into());
    }
    let looks_decimal = trimmed.contains(['.', 'e', 'E']);
    if looks_decimal && significant_digits(trimmed) <= F64_EXACT_DIGITS {
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER {
                return Value::Number((f as i64).into());
            }
            if let Some(n) = Number::from_f64(f) {
                return Value::Number(n);
            }
        }
    }
    Value::String(text.to_string())
}

/// Digits in the mantissa, ignoring leading and trailing zeros.
fn significant_digits(text: &str) -> usize {
    let mantissa = text.split(['e', 'E']).next().unwrap_or_default();
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    digits.trim_start_matches('0').trim_end_matches('0').len()
}
