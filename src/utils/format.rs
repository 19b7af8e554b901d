//! Display formatting for counts, fees and file sizes.

/// Groups the integer part with commas: `1234567` -> `1,234,567`.
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn currency_symbol(currency: &str) -> String {
    match currency.to_ascii_uppercase().as_str() {
        "MYR" => "RM".to_string(),
        "USD" => "US$".to_string(),
        "AUD" => "A$".to_string(),
        "GBP" => "£".to_string(),
        "EUR" => "€".to_string(),
        "CNY" => "CN¥".to_string(),
        "JPY" => "JP¥".to_string(),
        "" => String::new(),
        other => format!("{} ", other),
    }
}

/// Whole-unit currency amount in the Malaysian English style, e.g. `RM38,500`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let rounded = amount.abs().round() as u64;
    let sign = if amount < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{}{}{}", sign, currency_symbol(currency), format_number(rounded))
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// `1536` -> `1.5 KB`; at most two decimals with trailing zeros dropped.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{:.2}", scaled);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}
