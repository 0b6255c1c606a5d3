//! Number formatting for rendered tables and CSV output

/// Format a cost as dollars and cents with digit grouping: `$1,234.56`
pub(crate) fn format_cost(cost: f64) -> String {
    let cents = format!("{:.2}", cost.abs());
    let (int_part, frac_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let sign = if cost < 0.0 { "-" } else { "" };
    format!("{sign}${}.{frac_part}", group_digits(int_part))
}

/// Format a fraction as a percentage: `0.8571` → `85.71%`
pub(crate) fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.chars().rev().collect()
}
