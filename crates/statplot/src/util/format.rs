/// Unicode superscript for an exponent, e.g. -10 -> "⁻¹⁰"
fn superscript(exponent: i32) -> String {
    let mut out = String::new();
    if exponent < 0 {
        out.push('⁻');
    }
    for digit in exponent.unsigned_abs().to_string().chars() {
        out.push(match digit {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            _ => '⁹',
        });
    }
    out
}

/// Format a value in scientific notation as "m × 10ⁿ" with `decimals` mantissa digits.
///
/// Zero and non-finite values fall back to plain formatting.
pub fn format_scientific(value: f64, decimals: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value:.decimals$}");
    }

    // Let the formatter do the rounding so 9.9996e-5 becomes 1.000e-4
    let formatted = format!("{value:.decimals$e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    match exponent.parse::<i32>() {
        Ok(0) => mantissa.to_string(),
        Ok(exponent) => format!("{mantissa} × 10{}", superscript(exponent)),
        Err(_) => formatted,
    }
}
