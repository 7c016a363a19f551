//! Display timezone handling. Every timestamp shown in a message goes through
//! this module so that it is rendered in the fixed UTC+8 offset.

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Utc};

const DISPLAY_OFFSET: FixedOffset = match FixedOffset::east_opt(8 * 3600) {
    Some(offset) => offset,
    None => panic!("display offset out of range"),
};

/// Label appended to displayed timestamps.
pub const DISPLAY_ZONE_LABEL: &str = "台北時間";

pub fn display_offset() -> FixedOffset {
    DISPLAY_OFFSET
}

/// Moves an instant into the display offset. Converting an already converted
/// value returns it unchanged.
pub fn to_display<Tz: TimeZone>(dt: &DateTime<Tz>) -> DateTime<FixedOffset> {
    dt.with_timezone(&display_offset())
}

/// Epoch seconds to display time, `None` when out of chrono's range.
pub fn from_epoch(seconds: i64) -> Option<DateTime<FixedOffset>> {
    Utc.timestamp_opt(seconds, 0).single().map(|dt| to_display(&dt))
}

/// `2023年11月15日 06:13:20`
pub fn format_display(dt: &DateTime<FixedOffset>) -> String {
    format!(
        "{}年{:02}月{:02}日 {}",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.format("%H:%M:%S")
    )
}
