//! Shared utility functions for bike sharing crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    /// Format a date and hour of day as "YYYY-MM-DD HH:00"
    pub fn format_date_hour(date: &NaiveDate, hour: u8) -> String {
        format!("{} {:02}:00", format_date(date), hour)
    }

}

/// Number formatting for text reports
pub mod numbers {
    /// Format an integer with comma thousands separators, e.g. 1234567 -> "1,234,567"
    pub fn format_thousands(value: u64) -> String {
        let digits = value.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }

    /// Format a mean with thousands separators and two decimals.
    pub fn format_mean(value: f64) -> String {
        let rounded = (value * 100.0).round() / 100.0;
        let whole = rounded.trunc() as u64;
        let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;
        format!("{}.{:02}", format_thousands(whole), cents)
    }

}
