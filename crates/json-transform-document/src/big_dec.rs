use std::cmp::Ordering;
use std::fmt;

use serde_json::Number;

/// A plain-decimal number parsed from a JSON number literal.
///
/// Values are held in normalized sign/digits/exponent form
/// (`value = digits * 10^exp`, digits with no leading or trailing zeros),
/// so `1`, `1.0` and `1e0` all normalize to the same representation and
/// comparison is exact at any magnitude or precision. Narrowing to native
/// numerics happens only at explicit calls ([`BigDec::to_i64`],
/// [`crate::unwrap_value`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigDec {
    neg: bool,
    /// Significant digits, most significant first. Empty means zero.
    digits: String,
    exp: i64,
}

/// Exponents clamp to this magnitude, so any literal serde_json retains
/// stays representable and renders with a bounded number of zeros. Values
/// past the clamp keep a defined order (by sign, then digits).
const EXP_LIMIT: i64 = 1_000_000;

impl BigDec {
    /// The canonical zero.
    pub fn zero() -> Self {
        BigDec { neg: false, digits: String::new(), exp: 0 }
    }

    /// Parse a JSON number literal (`-12.30e4` and friends).
    ///
    /// Returns `None` for anything that is not a decimal literal.
    pub fn parse(text: &str) -> Option<Self> {
        let s = text.trim();
        let (neg, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (mantissa, mut exp) = match s.find(['e', 'E']) {
            Some(i) => {
                let e = &s[i + 1..];
                let e = e.strip_prefix('+').unwrap_or(e);
                (&s[..i], parse_exponent(e)?)
            }
            None => (s, 0i64),
        };
        let (int_part, frac_part) = match mantissa.find('.') {
            Some(i) => (&mantissa[..i], &mantissa[i + 1..]),
            None => (mantissa, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        exp = exp.saturating_sub(frac_part.len() as i64);

        let mut digits = String::with_capacity(int_part.len() + frac_part.len());
        digits.push_str(int_part);
        digits.push_str(frac_part);

        let leading = digits.bytes().take_while(|&b| b == b'0').count();
        digits.drain(..leading);
        while digits.ends_with('0') {
            digits.pop();
            exp = exp.saturating_add(1);
        }
        if digits.is_empty() {
            return Some(BigDec::zero());
        }
        Some(BigDec { neg, digits, exp })
    }

    /// Decimal view of a `serde_json` number.
    ///
    /// serde_json numbers always print as valid JSON number literals, so
    /// the zero fallback is never taken for real input.
    pub fn of(n: &Number) -> Self {
        BigDec::parse(&n.to_string()).unwrap_or_else(BigDec::zero)
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// True when the value has no fractional part.
    pub fn is_integer(&self) -> bool {
        self.exp >= 0
    }

    /// Exact conversion to `i64`; `None` when fractional or out of range.
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        // i64 never has more than 19 decimal digits; skip rendering
        // anything wider
        if self.exp.saturating_add(self.digits.len() as i64) > 19 {
            return None;
        }
        self.to_plain_string().parse().ok()
    }

    /// Plain-decimal rendering: no exponent, no trailing fractional zeros,
    /// at least one significant digit. Whole values render with no
    /// fractional part (`1.0` renders as `1`, `1e2` as `100`).
    pub fn to_plain_string(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut out = String::new();
        if self.neg {
            out.push('-');
        }
        if self.exp >= 0 {
            out.push_str(&self.digits);
            for _ in 0..self.exp {
                out.push('0');
            }
        } else {
            let point = self.digits.len() as i64 + self.exp;
            if point > 0 {
                let point = point as usize;
                out.push_str(&self.digits[..point]);
                out.push('.');
                out.push_str(&self.digits[point..]);
            } else {
                out.push_str("0.");
                for _ in 0..-point {
                    out.push('0');
                }
                out.push_str(&self.digits);
            }
        }
        out
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        // Position of the most significant digit decides first; at equal
        // position the digit strings compare lexicographically (shorter
        // strings are prefixes of equal value extended with zeros, and
        // normalization has stripped trailing zeros).
        let adj_a = self.exp.saturating_add(self.digits.len() as i64);
        let adj_b = other.exp.saturating_add(other.digits.len() as i64);
        match adj_a.cmp(&adj_b) {
            Ordering::Equal => self.digits.cmp(&other.digits),
            ord => ord,
        }
    }
}

impl Ord for BigDec {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => {
                if other.neg {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (false, true) => {
                if self.neg {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (false, false) => {
                if self.neg != other.neg {
                    return if self.neg { Ordering::Less } else { Ordering::Greater };
                }
                let mag = self.cmp_magnitude(other);
                if self.neg {
                    mag.reverse()
                } else {
                    mag
                }
            }
        }
    }
}

impl PartialOrd for BigDec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BigDec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

/// Parse an exponent suffix (sign already split off the mantissa, `+`
/// stripped), clamping its magnitude to [`EXP_LIMIT`].
fn parse_exponent(text: &str) -> Option<i64> {
    let (neg, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX).min(EXP_LIMIT);
    Some(if neg { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDec {
        BigDec::parse(s).unwrap()
    }

    #[test]
    fn normalizes_equivalent_literals() {
        assert_eq!(dec("1"), dec("1.0"));
        assert_eq!(dec("1"), dec("1e0"));
        assert_eq!(dec("100"), dec("1e2"));
        assert_eq!(dec("0.5"), dec("5e-1"));
        assert_eq!(dec("0"), dec("0.000"));
        assert_eq!(dec("0"), dec("-0"));
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(dec("2") > dec("1.5"));
        assert!(dec("12") < dec("12.3"));
        assert!(dec("12") > dec("11.9"));
        assert!(dec("-1") < dec("0.1"));
        assert!(dec("-2") < dec("-1"));
        assert!(dec("1e10") > dec("9999999999"));
        // precision beyond f64
        assert!(dec("0.10000000000000000001") > dec("0.1"));
        assert_eq!(dec("123.450e2").cmp(&dec("12345")), Ordering::Equal);
    }

    #[test]
    fn plain_string_drops_exponent_and_trailing_zeros() {
        assert_eq!(dec("1.0").to_plain_string(), "1");
        assert_eq!(dec("1e2").to_plain_string(), "100");
        assert_eq!(dec("0.10").to_plain_string(), "0.1");
        assert_eq!(dec("-2.500").to_plain_string(), "-2.5");
        assert_eq!(dec("5e-3").to_plain_string(), "0.005");
        assert_eq!(dec("1e21").to_plain_string(), "1000000000000000000000");
        assert_eq!(dec("0.000").to_plain_string(), "0");
    }

    #[test]
    fn integer_detection_and_narrowing() {
        assert!(dec("42").is_integer());
        assert!(dec("42.0").is_integer());
        assert!(!dec("42.5").is_integer());
        assert_eq!(dec("-7.0").to_i64(), Some(-7));
        assert_eq!(dec("0.5").to_i64(), None);
        assert_eq!(dec("1e20").to_i64(), None); // beyond i64::MAX
    }

    #[test]
    fn rejects_non_literals() {
        assert!(BigDec::parse("abc").is_none());
        assert!(BigDec::parse("").is_none());
        assert!(BigDec::parse("1e").is_none());
        assert!(BigDec::parse("1.2.3").is_none());
    }

    #[test]
    fn huge_exponents_clamp_instead_of_failing() {
        let big = dec("1e99999999999999999999");
        assert!(big > dec("1e10"));
        assert!(big > dec("0"));
        let tiny = dec("1e-99999999999999999999");
        assert!(tiny < dec("0.1"));
        assert!(tiny > dec("0"));
        assert_eq!(dec("1e99999999999999999999"), dec("1E+99999999999999999999"));
        assert_eq!(big.to_i64(), None);
    }

    #[test]
    fn of_reads_serde_numbers() {
        let v: serde_json::Value = serde_json::from_str("3.140").unwrap();
        let n = v.as_number().unwrap();
        assert_eq!(BigDec::of(n).to_plain_string(), "3.14");
    }

    #[test]
    fn of_handles_extreme_exponents() {
        let v: serde_json::Value = serde_json::from_str("1e99999999999999999999").unwrap();
        let n = v.as_number().unwrap();
        assert!(BigDec::of(n) > dec("1"));
    }
}
