//! Serde helpers for human-readable durations such as `"500ms"`, `"1s"` or `"1m30s"`.
//!
//! Configuration files express production intervals as compact strings; the
//! simulation works with [`chrono::TimeDelta`]. Use with
//! `#[serde(with = "ladder_schemas::duration")]`.

use chrono::TimeDelta;
use serde::{Deserialize, Deserializer, Serializer};

/// Parses a duration string made of one or more `<number><unit>` pairs.
///
/// Supported units are `ms`, `s`, `m` and `h`. Fractional numbers are allowed
/// (`"1.5s"`), and pairs may be chained (`"1h30m"`). A bare `"0"` is accepted.
pub fn parse_duration(text: &str) -> Result<TimeDelta, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("empty duration".to_string());
    }
    if trimmed == "0" {
        return Ok(TimeDelta::zero());
    }

    let mut total_ms = 0.0_f64;
    let mut rest = trimmed;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(format!("expected a number in duration '{}'", trimmed));
        }
        let (number, tail) = rest.split_at(number_len);
        let value: f64 = number
            .parse()
            .map_err(|_| format!("invalid number '{}' in duration '{}'", number, trimmed))?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, remainder) = tail.split_at(unit_len);
        let scale_ms = match unit {
            "ms" => 1.0,
            "s" => 1_000.0,
            "m" => 60_000.0,
            "h" => 3_600_000.0,
            "" => return Err(format!("missing unit in duration '{}'", trimmed)),
            other => return Err(format!("unknown unit '{}' in duration '{}'", other, trimmed)),
        };
        total_ms += value * scale_ms;
        rest = remainder;
    }

    Ok(TimeDelta::microseconds((total_ms * 1_000.0).round() as i64))
}

/// Formats a duration using the largest unit that divides it exactly.
pub fn format_duration(duration: TimeDelta) -> String {
    let ms = duration.num_milliseconds();
    if ms != 0 && ms % 3_600_000 == 0 {
        format!("{}h", ms / 3_600_000)
    } else if ms != 0 && ms % 60_000 == 0 {
        format!("{}m", ms / 60_000)
    } else if ms != 0 && ms % 1_000 == 0 {
        format!("{}s", ms / 1_000)
    } else {
        format!("{}ms", ms)
    }
}

pub fn serialize<S>(duration: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_duration(*duration))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<TimeDelta, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_duration(&text).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_units() {
        assert_eq!(parse_duration("250ms").unwrap(), TimeDelta::milliseconds(250));
        assert_eq!(parse_duration("1s").unwrap(), TimeDelta::seconds(1));
        assert_eq!(parse_duration("2m").unwrap(), TimeDelta::minutes(2));
        assert_eq!(parse_duration("1h").unwrap(), TimeDelta::hours(1));
    }

    #[test]
    fn parses_fractions_and_compounds() {
        assert_eq!(parse_duration("1.5s").unwrap(), TimeDelta::milliseconds(1_500));
        assert_eq!(parse_duration("1m30s").unwrap(), TimeDelta::seconds(90));
        assert_eq!(parse_duration(" 1h1m1s ").unwrap(), TimeDelta::seconds(3_661));
        assert_eq!(parse_duration("0").unwrap(), TimeDelta::zero());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("-1s").is_err());
        assert!(parse_duration("5 parsecs").is_err());
        assert!(parse_duration("s").is_err());
    }

    #[test]
    fn formats_with_largest_exact_unit() {
        assert_eq!(format_duration(TimeDelta::seconds(90)), "90s");
        assert_eq!(format_duration(TimeDelta::minutes(3)), "3m");
        assert_eq!(format_duration(TimeDelta::hours(2)), "2h");
        assert_eq!(format_duration(TimeDelta::milliseconds(1_500)), "1500ms");
        assert_eq!(format_duration(TimeDelta::zero()), "0ms");
    }
}
