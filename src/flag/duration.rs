//! Duration literals in the `1h30m` / `250ms` notation

use core::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;

// Fraction digits beyond this cannot change a nanosecond value
const MAX_FRACTION_DIGITS: u32 = 18;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(60 * NANOS_PER_SECOND),
        "h" => Some(3600 * NANOS_PER_SECOND),
        _ => None,
    }
}

/// Parse a duration such as `300ms`, `1.5h` or `2h45m`
///
/// A duration is a sequence of decimal numbers, each with an optional
/// fraction and a mandatory unit suffix. Valid units are `ns`, `us` (or
/// `µs`), `ms`, `s`, `m` and `h`. The bare literal `0` is accepted.
///
/// # Errors
///
/// Returns an error if:
/// - The input is empty or negative
/// - A number is missing its unit, or the unit is unknown
/// - The total does not fit in a `u64` of nanoseconds
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let mut rest = input.strip_prefix('+').unwrap_or(input);
    if input.starts_with('-') {
        return Err(format!("negative duration {input:?}"));
    }
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(format!("invalid duration {input:?}"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let whole_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let (whole, after_whole) = rest.split_at(whole_len);

        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(tail) => {
                let len = tail.find(|c: char| !c.is_ascii_digit()).unwrap_or(tail.len());
                tail.split_at(len)
            }
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(format!("invalid duration {input:?}"));
        }

        let unit_len = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, tail) = after_number.split_at(unit_len);
        if unit.is_empty() {
            return Err(format!("missing unit in duration {input:?}"));
        }
        let scale =
            unit_nanos(unit).ok_or_else(|| format!("unknown unit {unit:?} in duration {input:?}"))?;

        let overflow = || format!("duration {input:?} is out of range");
        let whole_value: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let mut value = whole_value.checked_mul(scale).ok_or_else(overflow)?;

        if !fraction.is_empty() {
            let digits: String = fraction.chars().take(MAX_FRACTION_DIGITS as usize).collect();
            let numerator: u128 = digits.parse().map_err(|_| overflow())?;
            let denominator = 10_u128.pow(u32::try_from(digits.len()).map_err(|_| overflow())?);
            value = value
                .checked_add(numerator.checked_mul(scale).ok_or_else(overflow)? / denominator)
                .ok_or_else(overflow)?;
        }

        total = total.checked_add(value).ok_or_else(overflow)?;
        rest = tail;
    }

    let nanos = u64::try_from(total).map_err(|_| format!("duration {input:?} is out of range"))?;
    Ok(Duration::from_nanos(nanos))
}

/// Render a duration the way [`parse_duration`] reads it, e.g. `1h30m0s`
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_owned();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!(
            "{}µs",
            with_fraction(nanos / NANOS_PER_MICRO, nanos % NANOS_PER_MICRO, 3)
        );
    }
    if nanos < NANOS_PER_SECOND {
        return format!(
            "{}ms",
            with_fraction(nanos / NANOS_PER_MILLI, nanos % NANOS_PER_MILLI, 6)
        );
    }

    let secs = duration.as_secs();
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = with_fraction(
        u128::from(secs % 60),
        u128::from(duration.subsec_nanos()),
        9,
    );

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

fn with_fraction(whole: u128, fraction: u128, precision: usize) -> String {
    if fraction == 0 {
        return whole.to_string();
    }
    let digits = format!("{fraction:0precision$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_compound_durations() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration("300ms").unwrap(), Duration::from_millis(300));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration(".5m").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("2us").unwrap(), Duration::from_micros(2));
        assert_eq!(parse_duration("2µs").unwrap(), Duration::from_micros(2));
        assert_eq!(parse_duration("+10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_rejects_malformed_durations() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("10").unwrap_err().contains("missing unit"));
        assert!(parse_duration("3x").unwrap_err().contains("unknown unit"));
        assert!(parse_duration("-1s").unwrap_err().contains("negative"));
        assert!(parse_duration("h").is_err());
        assert!(parse_duration("99999999999h").unwrap_err().contains("out of range"));
    }

    #[test]
    fn test_formats_like_it_parses() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_nanos(42)), "42ns");
        assert_eq!(format_duration(Duration::from_nanos(1500)), "1.5µs");
        assert_eq!(format_duration(Duration::from_millis(300)), "300ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(150)), "2m30s");
        assert_eq!(format_duration(Duration::from_secs(5400)), "1h30m0s");

        for literal in ["1h30m0s", "2m30s", "1.5s", "300ms"] {
            let parsed = parse_duration(literal).unwrap();
            assert_eq!(format_duration(parsed), literal);
        }
    }
}
