//! Turns fetched data into message text.

pub mod clock;
pub mod gold;
pub mod number;
pub mod rate;

use chrono::{DateTime, Utc};

pub use gold::format_quote;
pub use rate::format_rate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Banner,
    Gold,
    Rate,
}

/// One formatted block of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub text: String,
}

/// `🕐 系統時間：2023年11月15日 06:13:20 (台北時間)`
pub fn format_banner(now: &DateTime<Utc>) -> String {
    format!(
        "🕐 系統時間：{} ({})",
        clock::format_display(&clock::to_display(now)),
        clock::DISPLAY_ZONE_LABEL
    )
}

/// Escapes text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_banner_uses_display_offset() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 20, 30, 5).unwrap();
        assert_eq!(
            format_banner(&now),
            "🕐 系統時間：2025年01月01日 04:30:05 (台北時間)"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("A&B <i>"), "A&amp;B &lt;i&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
