use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric record value that remembers whether it was written as an integer.
///
/// LAMMPS rejects `10000.0` where it expects a count, so integers render
/// without a decimal part and floats through [`format_float`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Integer(i64),
    Float(f64),
}

impl Numeric {
    /// Parses text as an integer if possible, otherwise as a float.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        text.parse::<i64>()
            .map(Numeric::Integer)
            .ok()
            .or_else(|| text.parse::<f64>().ok().map(Numeric::Float))
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Numeric::Integer(value) => *value as f64,
            Numeric::Float(value) => *value,
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Integer(value) => write!(f, "{value}"),
            Numeric::Float(value) => f.write_str(&format_float(*value)),
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Integer(value)
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Float(value)
    }
}

/// Formats a float the way LAMMPS input decks conventionally spell it.
///
/// Integral values keep a trailing `.0` (`99.0`), other values use the
/// shortest round-trip representation (`55.845`), and very large or very small
/// magnitudes switch to exponent form with a signed, two-digit exponent
/// (`1e-05`, `1e+20`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let repr = format!("{:e}", value);
        return match repr.split_once('e') {
            Some((mantissa, exponent)) => match exponent.parse::<i32>() {
                Ok(exp) => format!(
                    "{}e{}{:02}",
                    mantissa,
                    if exp < 0 { '-' } else { '+' },
                    exp.abs()
                ),
                Err(_) => repr,
            },
            None => repr,
        };
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_keep_trailing_zero() {
        assert_eq!(format_float(99.0), "99.0");
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-3.0), "-3.0");
    }

    #[test]
    fn fractional_values_use_shortest_representation() {
        assert_eq!(format_float(55.8), "55.8");
        assert_eq!(format_float(58.6934), "58.6934");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(0.0001), "0.0001");
    }

    #[test]
    fn extreme_magnitudes_use_signed_two_digit_exponents() {
        assert_eq!(format_float(1e-5), "1e-05");
        assert_eq!(format_float(2.5e-7), "2.5e-07");
        assert_eq!(format_float(1e20), "1e+20");
        assert_eq!(format_float(-1e16), "-1e+16");
    }

    #[test]
    fn numeric_parse_keeps_integers_apart_from_floats() {
        assert_eq!(Numeric::parse(" 10000 "), Some(Numeric::Integer(10000)));
        assert_eq!(Numeric::parse("-8"), Some(Numeric::Integer(-8)));
        assert_eq!(Numeric::parse("1.0"), Some(Numeric::Float(1.0)));
        assert_eq!(Numeric::parse("2e-5"), Some(Numeric::Float(2e-5)));
        assert_eq!(Numeric::parse("ten"), None);
    }

    #[test]
    fn numeric_display_spells_integers_without_decimal_part() {
        assert_eq!(Numeric::Integer(10000).to_string(), "10000");
        assert_eq!(Numeric::Float(10000.0).to_string(), "10000.0");
        assert_eq!(Numeric::Float(0.5).to_string(), "0.5");
        assert_eq!(Numeric::Integer(3).as_f64(), 3.0);
    }

    #[test]
    fn non_finite_values_are_spelled_out() {
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }
}
