//! Measurement text parsing

/// Parse one measurement line.
///
/// Reads the leading number of the line, so unit suffixes such as `3m` or
/// `1,5 metros` are accepted. The first comma is taken as the decimal
/// separator. Blank, unparseable, non-finite and non-positive values yield
/// `None`.
pub fn parse_measurement_line(line: &str) -> Option<f64> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = trimmed.replacen(',', ".", 1);
    leading_number(&normalized).filter(|value| value.is_finite() && *value > 0.0)
}

/// Parse line-separated measurements, keeping input order.
///
/// Invalid lines are dropped silently; callers check the resulting count.
pub fn parse_measurements(text: &str) -> Vec<f64> {
    text.lines().filter_map(parse_measurement_line).collect()
}

/// Longest prefix of `s` that reads as a decimal number.
///
/// Grammar: optional sign, digits with an optional fraction, then an
/// optional exponent that only counts when it has digits.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        start + bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 {
            digits += frac_end - end - 1;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
