//! Raw token to typed value conversion.
//!
//! Every value written to a destination passes through [`convert`]. An
//! empty raw string falls back to the field's default before conversion.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use thiserror::Error;

use crate::types::{DEFAULT_TIME_FORMAT, FieldSchema, Value, ValueType};

/// A token or default string could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {input:?} to {value_type}: {reason}")]
pub struct ConversionError {
    /// Target type.
    pub value_type: ValueType,
    /// The string that failed to convert (after default fallback).
    pub input: String,
    /// Underlying parser message.
    pub reason: String,
}

impl ConversionError {
    fn new(value_type: ValueType, input: &str, reason: impl ToString) -> Self {
        Self {
            value_type,
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Converts `raw` (or `default`, when `raw` is empty) to `value_type`.
///
/// `format` is only consulted for [`ValueType::Time`].
///
/// # Examples
///
/// ```
/// use argbind_core::{ValueType, Value, convert};
///
/// assert_eq!(convert(ValueType::Int, "", "7", None).unwrap(), Value::Int(7));
/// assert_eq!(convert(ValueType::Int, "9", "7", None).unwrap(), Value::Int(9));
/// assert!(convert(ValueType::Int, "9a", "", None).is_err());
/// assert_eq!(convert(ValueType::Bool, "", "", None).unwrap(), Value::Bool(true));
/// ```
pub fn convert(
    value_type: ValueType,
    raw: &str,
    default: &str,
    format: Option<&str>,
) -> Result<Value, ConversionError> {
    let input = if raw.is_empty() { default } else { raw };

    match value_type {
        ValueType::Bool => Ok(Value::Bool(true)),
        ValueType::String => Ok(Value::String(input.to_string())),
        ValueType::Int => input
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|err| ConversionError::new(value_type, input, err)),
        ValueType::Float => input
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|err| ConversionError::new(value_type, input, err)),
        ValueType::Time => parse_time(input, format.unwrap_or(DEFAULT_TIME_FORMAT))
            .map(Value::Time)
            .map_err(|err| ConversionError::new(value_type, input, err)),
        ValueType::Duration => parse_duration(input)
            .map(Value::Duration)
            .map_err(|reason| ConversionError::new(value_type, input, reason)),
    }
}

/// Converts `raw` using the type, default and format of `field`.
pub fn convert_field(field: &FieldSchema, raw: &str) -> Result<Value, ConversionError> {
    convert(
        field.value_type(),
        raw,
        field.default_str(),
        field.format_str(),
    )
}

/// Parses a time with a `strftime` pattern.
///
/// Patterns with only date fields yield midnight; patterns with only time
/// fields yield that time on `0000-01-01`.
pub fn parse_time(input: &str, format: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let err = match NaiveDateTime::parse_from_str(input, format) {
        Ok(time) => return Ok(time),
        Err(err) => err,
    };
    if let Ok(date) = NaiveDate::parse_from_str(input, format) {
        return Ok(date.and_time(NaiveTime::default()));
    }
    if let Ok(time) = NaiveTime::parse_from_str(input, format) {
        if let Some(date) = NaiveDate::from_ymd_opt(0, 1, 1) {
            return Ok(date.and_time(time));
        }
    }
    Err(err)
}

const NANOS_PER_UNIT: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];

/// Parses a duration such as `300ms`, `1h30m` or `-1.5h`.
///
/// The input is an optional sign followed by one or more decimal numbers,
/// each with a unit suffix. The bare string `0` is accepted.
///
/// # Examples
///
/// ```
/// use argbind_core::parse_duration;
/// use chrono::TimeDelta;
///
/// assert_eq!(parse_duration("300ms").unwrap(), TimeDelta::milliseconds(300));
/// assert_eq!(parse_duration("1h30m").unwrap(), TimeDelta::minutes(90));
/// assert!(parse_duration("10").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<TimeDelta, String> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err("invalid duration".to_string());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let whole_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (whole, after) = rest.split_at(whole_len);
        let (fraction, after) = match after.strip_prefix('.') {
            Some(after) => {
                let len = after.bytes().take_while(u8::is_ascii_digit).count();
                after.split_at(len)
            }
            None => ("", after),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err("invalid duration".to_string());
        }

        let unit_len = after
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() || *c == '.')
            .map_or(after.len(), |(i, _)| i);
        let (unit, after) = after.split_at(unit_len);
        if unit.is_empty() {
            return Err("missing unit in duration".to_string());
        }
        let scale = NANOS_PER_UNIT
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(|| format!("unknown unit {unit:?} in duration"))?;

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| "invalid duration".to_string())?
        };
        let mut nanos = whole
            .checked_mul(scale)
            .ok_or_else(|| "duration out of range".to_string())?;
        if !fraction.is_empty() {
            // Digits beyond nanosecond precision at any unit are irrelevant.
            let digits = &fraction[..fraction.len().min(18)];
            let numerator: u128 = digits.parse().map_err(|_| "invalid duration".to_string())?;
            nanos = nanos
                .checked_add(numerator * scale / 10u128.pow(digits.len() as u32))
                .ok_or_else(|| "duration out of range".to_string())?;
        }

        total = total
            .checked_add(nanos)
            .filter(|total| *total <= i64::MAX as u128)
            .ok_or_else(|| "duration out of range".to_string())?;
        rest = after;
    }

    let nanos = total as i64;
    Ok(TimeDelta::nanoseconds(if negative { -nanos } else { nanos }))
}

/// Renders a duration in the syntax accepted by [`parse_duration`].
///
/// Durations under one second use the largest of `ns`, `µs` or `ms` that
/// fits; longer ones use `h`, `m` and fractional `s`, e.g. `1h2m3.5s`.
pub fn format_duration(duration: TimeDelta) -> String {
    let nanos = duration.num_nanoseconds().unwrap_or(if duration < TimeDelta::zero() {
        i64::MIN
    } else {
        i64::MAX
    });
    if nanos == 0 {
        return "0s".to_string();
    }

    let sign = if nanos < 0 { "-" } else { "" };
    let mut rest = nanos.unsigned_abs();
    if rest < 1_000_000_000 {
        let (unit, scale) = match rest {
            0..1_000 => ("ns", 1),
            1_000..1_000_000 => ("µs", 1_000),
            _ => ("ms", 1_000_000),
        };
        return format!("{sign}{}{unit}", decimal(rest, scale));
    }

    let hours = rest / 3_600_000_000_000;
    rest %= 3_600_000_000_000;
    let minutes = rest / 60_000_000_000;
    rest %= 60_000_000_000;

    let mut out = sign.to_string();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&decimal(rest, 1_000_000_000));
    out.push('s');
    out
}

fn decimal(value: u64, scale: u64) -> String {
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return whole.to_string();
    }
    let width = scale.ilog10() as usize;
    let digits = format!("{fraction:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
