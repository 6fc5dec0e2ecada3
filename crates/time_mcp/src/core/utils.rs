// Wire formats shared by the tool payloads
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
pub const TIME_INPUT_FORMAT: &str = "%H:%M";
pub const DAY_FORMAT: &str = "%A";

/// Resource URIs served by the Time MCP Server
pub const AVAILABLE_RESOURCES: &[&str] = &["time://status", "time://help", "time://timezones"];

/// Render the UTC-offset difference between two zones in fractional hours.
///
/// Whole hours drop the fraction (`+9h`); partial offsets keep up to two
/// decimals with trailing zeros trimmed (`+5.5h`, `+5.75h`).
pub fn format_utc_offset_delta(delta_minutes: i64) -> String {
    if delta_minutes % 60 == 0 {
        format!("{:+}h", delta_minutes / 60)
    } else {
        let hours = delta_minutes as f64 / 60.0;
        let rendered = format!("{hours:+.2}");
        format!("{}h", rendered.trim_end_matches('0').trim_end_matches('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::format_utc_offset_delta;

    #[test]
    fn test_whole_hour_offsets() {
        assert_eq!(format_utc_offset_delta(0), "+0h");
        assert_eq!(format_utc_offset_delta(60), "+1h");
        assert_eq!(format_utc_offset_delta(-180), "-3h");
        assert_eq!(format_utc_offset_delta(540), "+9h");
    }

    #[test]
    fn test_fractional_hour_offsets() {
        // India (UTC+5:30) and Nepal (UTC+5:45) relative to UTC
        assert_eq!(format_utc_offset_delta(330), "+5.5h");
        assert_eq!(format_utc_offset_delta(345), "+5.75h");
        assert_eq!(format_utc_offset_delta(-345), "-5.75h");
        assert_eq!(format_utc_offset_delta(-30), "-0.5h");
    }
}
