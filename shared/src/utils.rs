// Number formatting shared by the engine's text output and any external
// presentation layer.

/// Formats `value` with a fixed number of decimals, optionally grouping the
/// integer part in thousands with `,` (e.g. `1234567.891` -> `1,234,567.89`).
pub fn format_decimal(value: f64, decimals: usize, thousands_separator: bool) -> String {
    let formatted = format!("{:.decimals$}", value, decimals = decimals);
    if !thousands_separator || !value.is_finite() {
        return formatted;
    }

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
