//! Display formatting for terminal output
//!
//! Turns service results into plain-text tables. Money is printed with the
//! symbol and separator from the user's settings.

pub mod debt;
pub mod household;
pub mod vehicle;

pub use debt::{format_debt_list, format_debt_overview, format_payoff_plan};
pub use household::{format_breakdown, format_expense_list, format_fund_status, format_period_history};
pub use vehicle::{format_savings_goals, format_vehicle_summary, format_work_summary};

/// Thin separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Title centred over a line of the given width
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = width.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(padding), title)
}

/// Truncate to `max_len` characters, ending with "..." when cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Text progress bar, `width` cells wide
pub fn format_bar(value: i64, max_value: i64, width: usize) -> String {
    let filled = if max_value <= 0 {
        0
    } else {
        let ratio = value.clamp(0, max_value) as f64 / max_value as f64;
        (ratio * width as f64).round() as usize
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Mamá", 10), "Mamá");
        assert_eq!(truncate("Préstamo de la moto", 10), "Préstam...");
        assert_eq!(truncate("abcdef", 2), "..");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(5, 10, 4), "██░░");
        assert_eq!(format_bar(20, 10, 4), "████");
        assert_eq!(format_bar(1, 0, 3), "░░░");
    }

    #[test]
    fn test_header_centres() {
        assert_eq!(format_header("abc", 7), "  abc");
    }
}
