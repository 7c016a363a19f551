//! Fixed-precision number rendering with thousands separators.

/// Renders `value` with `decimals` places and `,` between thousands,
/// e.g. `1900.5` with 3 places → `1,900.500`.
pub fn grouped(value: f64, decimals: usize) -> String {
    let body = grouped_abs(value, decimals);
    if value.is_sign_negative() && !is_zero_at(value, decimals) {
        format!("-{body}")
    } else {
        body
    }
}

/// Like [`grouped`] but always carries a sign, e.g. `+5.300` or `-0.28`.
pub fn signed(value: f64, decimals: usize) -> String {
    let body = grouped_abs(value, decimals);
    if value.is_sign_negative() && !is_zero_at(value, decimals) {
        format!("-{body}")
    } else {
        format!("+{body}")
    }
}

fn is_zero_at(value: f64, decimals: usize) -> bool {
    format!("{:.*}", decimals, value.abs())
        .chars()
        .all(|c| c == '0' || c == '.')
}

fn grouped_abs(value: f64, decimals: usize) -> String {
    let plain = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut out = String::with_capacity(plain.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
