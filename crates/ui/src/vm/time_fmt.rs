use chrono::NaiveDate;

/// Countdown shown by the runner, `MM : SS`. Minutes are not wrapped into hours.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes:02} : {remainder:02}")
}

/// Renders an ISO date (or a timestamp starting with one) as `DD/MM/YYYY`.
#[must_use]
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "-".to_string();
    }
    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map_or_else(|| trimmed.to_string(), |date| date.format("%d/%m/%Y").to_string())
}

#[must_use]
pub fn format_score(score: f64) -> String {
    if score.is_finite() {
        format!("{score:.1}")
    } else {
        "-".to_string()
    }
}

/// Subtest length in whole minutes for the batch list.
#[must_use]
pub fn format_minutes(seconds: u32) -> String {
    format!("{} menit", seconds.div_ceil(60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_pads_both_fields() {
        assert_eq!(format_countdown(1800), "30 : 00");
        assert_eq!(format_countdown(65), "01 : 05");
        assert_eq!(format_countdown(0), "00 : 00");
        assert_eq!(format_countdown(6000), "100 : 00");
    }

    #[test]
    fn dates_render_day_first() {
        assert_eq!(format_date("2026-03-09"), "09/03/2026");
        assert_eq!(format_date("2026-03-09T10:11:12Z"), "09/03/2026");
        assert_eq!(format_date("kemarin"), "kemarin");
        assert_eq!(format_date(" "), "-");
    }

    #[test]
    fn scores_and_minutes() {
        assert_eq!(format_score(72.456), "72.5");
        assert_eq!(format_score(f64::NAN), "-");
        assert_eq!(format_minutes(1800), "30 menit");
        assert_eq!(format_minutes(90), "2 menit");
    }
}
