//! Numeric formatting with Procyon spellings.

/// Format a float as the shortest decimal that round-trips to the same
/// binary64. Finite values always carry a `.` or an `e` so they can never
/// re-lex as integers; specials spell `nan`, `inf` and `-inf`. Fixed
/// notation is used while the decimal exponent lies in [-4, 15],
/// scientific with a signed two-digit-minimum exponent otherwise.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` already produces the shortest mantissa; re-spell it.
    let shortest = format!("{f:e}");
    let (mantissa, exponent) = match shortest.split_once('e') {
        Some(parts) => parts,
        None => return shortest,
    };
    let exponent: i32 = match exponent.parse() {
        Ok(e) => e,
        Err(_) => return shortest,
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };

    if (-4..16).contains(&exponent) {
        let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
        if exponent < 0 {
            let zeros = "0".repeat(-(exponent + 1) as usize);
            format!("{sign}0.{zeros}{digits}")
        } else {
            let int_len = exponent as usize + 1;
            if digits.len() <= int_len {
                format!("{sign}{digits:0<int_len$}.0")
            } else {
                format!("{sign}{}.{}", &digits[..int_len], &digits[int_len..])
            }
        }
    } else {
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{sign}{mantissa}e{exp_sign}{:02}", exponent.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specials() {
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn fixed_vs_scientific_boundary() {
        assert_eq!(format_float(1e15), "1000000000000000.0");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1e-4), "0.0001");
        assert_eq!(format_float(1e-5), "1e-05");
    }

    #[test]
    fn zero_keeps_its_sign() {
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-0.0), "-0.0");
    }
}
