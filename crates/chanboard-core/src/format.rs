//! Number formatting shared by the TUI and CLI

/// Group an integer string with commas ("1234567" -> "1,234,567")
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Thousands-separated value with a fixed number of decimals
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };
    let sign = if value < 0.0 && raw.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, group_digits(int_part), frac),
        None => format!("{}{}", sign, group_digits(int_part)),
    }
}

/// Rounded, signed, thousands-separated ("+1,234", "-56", "+0")
pub fn format_signed_thousands(value: f64) -> String {
    let body = format_thousands(value, 0);
    if body.starts_with('-') {
        body
    } else {
        format!("+{}", body)
    }
}

/// Signed percentage with two decimals ("+5.00%")
pub fn format_signed_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

/// Compact form for chart labels ("1.2K", "3.40M")
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1_000_000_000.0 {
        format!("{}{:.2}B", sign, abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{}{:.2}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}{:.1}K", sign, abs / 1_000.0)
    } else if abs.fract() == 0.0 {
        format!("{}{}", sign, abs as u64)
    } else {
        format!("{}{:.1}", sign, abs)
    }
}
