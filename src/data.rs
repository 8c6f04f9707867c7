use std::cmp::Ordering;
use std::fmt;

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// One scalar cell fed to the profiling engine.
///
/// `Boolean` sits outside the inference lattice; the engine rejects it
/// with `UnsupportedValueKind` so callers can decide how to proceed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Empty,
    Text(String),
    Integer(i64),
    Float(f64),
    DateTime(NaiveDateTime),
    Boolean(bool),
}

impl Eq for Value {}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::Text(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => {
                if f.fract() == 0.0 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Value::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Value::Boolean(b) => b.to_string(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::DateTime(_) => "datetime",
            Value::Boolean(_) => "boolean",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Empty => 0,
            Value::Boolean(_) => 1,
            Value::Integer(_) => 2,
            Value::Float(_) => 3,
            Value::Text(_) => 4,
            Value::DateTime(_) => 5,
        }
    }
}

// Total order across heterogeneous variants so frequency maps iterate
// deterministically: variant rank first, then the value itself.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Empty, Value::Empty) => Ordering::Equal,
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Interprets one raw CSV cell. Blank cells are `Empty` either way;
/// with `infer_types` off every other cell stays `Text`.
pub fn parse_cell(raw: &str, infer_types: bool) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Empty;
    }
    if !infer_types {
        return Value::Text(raw.to_string());
    }
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Value::Integer(parsed);
    }
    if let Ok(parsed) = trimmed.parse::<f64>() {
        return Value::Float(parsed);
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    if let Ok(parsed) = parse_naive_datetime(trimmed) {
        return Value::DateTime(parsed);
    }
    if let Ok(parsed) = parse_naive_date(trimmed) {
        return Value::DateTime(parsed.and_time(NaiveTime::MIN));
    }
    Value::Text(raw.to_string())
}

pub fn parse_naive_date(value: &str) -> Result<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as date"))
}

pub fn parse_naive_datetime(value: &str) -> Result<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as datetime"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parse_cell_maps_blank_cells_to_empty() {
        assert_eq!(parse_cell("", false), Value::Empty);
        assert_eq!(parse_cell("   ", false), Value::Empty);
        assert_eq!(parse_cell("\t", true), Value::Empty);
    }

    #[test]
    fn parse_cell_raw_mode_keeps_everything_as_text() {
        assert_eq!(parse_cell("42", false), Value::Text("42".to_string()));
        assert_eq!(
            parse_cell("2024-05-06", false),
            Value::Text("2024-05-06".to_string())
        );
        assert_eq!(parse_cell("true", false), Value::Text("true".to_string()));
    }

    #[test]
    fn parse_cell_infers_numbers_dates_and_booleans() {
        assert_eq!(parse_cell("42", true), Value::Integer(42));
        assert_eq!(parse_cell("4.5", true), Value::Float(4.5));
        assert_eq!(parse_cell("TRUE", true), Value::Boolean(true));
        let expected = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert_eq!(parse_cell("2024-05-06", true), Value::DateTime(expected));
        assert_eq!(
            parse_cell("plainly text", true),
            Value::Text("plainly text".to_string())
        );
    }

    #[test]
    fn parse_naive_date_supports_multiple_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        assert_eq!(parse_naive_date("2024-05-06").unwrap(), expected);
        assert_eq!(parse_naive_date("06/05/2024").unwrap(), expected);
        assert_eq!(parse_naive_date("2024/05/06").unwrap(), expected);
    }

    #[test]
    fn parse_naive_datetime_supports_multiple_formats() {
        let expected =
            NaiveDateTime::parse_from_str("2024-05-06 14:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(parse_naive_datetime("2024-05-06T14:30:00").unwrap(), expected);
        assert_eq!(parse_naive_datetime("2024-05-06 14:30").unwrap(), expected);
    }

    #[test]
    fn value_order_is_total_across_variants() {
        let mut values = vec![
            Value::Text("b".to_string()),
            Value::Integer(7),
            Value::Empty,
            Value::Text("a".to_string()),
            Value::Float(1.5),
        ];
        values.sort();
        assert_eq!(values[0], Value::Empty);
        assert_eq!(values[1], Value::Integer(7));
        assert_eq!(values[2], Value::Float(1.5));
        assert_eq!(values[3], Value::Text("a".to_string()));
        assert_eq!(values[4], Value::Text("b".to_string()));
    }
}
