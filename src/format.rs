//! Display Formatting
//!
//! Small helpers turning chart and contest data into UI strings.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::models::{Contest, Song};

/// Chart movement relative to last week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    New,
    ReEntry,
    Up(u32),
    Down(u32),
    Same,
}

pub fn movement(position: u32, last_week: Option<u32>, peak: Option<u32>, weeks: Option<u32>) -> Movement {
    match last_week {
        None => {
            let charted_before = peak.is_some_and(|p| p < position) || weeks.is_some_and(|w| w > 1);
            if charted_before {
                Movement::ReEntry
            } else {
                Movement::New
            }
        }
        Some(last) if last > position => Movement::Up(last - position),
        Some(last) if last < position => Movement::Down(position - last),
        Some(_) => Movement::Same,
    }
}

pub fn song_movement(song: &Song) -> Movement {
    movement(song.position, song.last_week_position, song.peak_position, song.weeks_on_chart)
}

impl Movement {
    pub fn label(&self) -> String {
        match self {
            Movement::New => "NEW".to_string(),
            Movement::ReEntry => "RE-ENTRY".to_string(),
            Movement::Up(n) => format!("▲{}", n),
            Movement::Down(n) => format!("▼{}", n),
            Movement::Same => "=".to_string(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Movement::New | Movement::ReEntry => "movement new",
            Movement::Up(_) => "movement up",
            Movement::Down(_) => "movement down",
            Movement::Same => "movement same",
        }
    }
}

pub fn weeks_label(weeks: u32) -> String {
    if weeks == 1 {
        "1 week".to_string()
    } else {
        format!("{} weeks", weeks)
    }
}

/// "Week of March 8, 2025"
pub fn week_label(date: NaiveDate) -> String {
    format!("Week of {}", date.format("%B %-d, %Y"))
}

/// Parse `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// "1,234"
pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

pub fn points_label(points: i64) -> String {
    if points == 1 {
        "1 pt".to_string()
    } else {
        format!("{} pts", thousands(points))
    }
}

/// Predictions close at the end of the contest's last day (UTC)
pub fn contest_deadline(contest: &Contest) -> Option<DateTime<Utc>> {
    let end = parse_date(&contest.end_date)?;
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)?;
    Some(end.and_time(end_of_day).and_utc())
}

/// "2d 4h left", "3h 12m left", "12m left", "Closed"
pub fn countdown(now: DateTime<Utc>, deadline: DateTime<Utc>) -> String {
    let remaining = deadline - now;
    if remaining <= Duration::zero() {
        return "Closed".to_string();
    }
    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;
    if days > 0 {
        format!("{}d {}h left", days, hours)
    } else if hours > 0 {
        format!("{}h {}m left", hours, minutes)
    } else {
        format!("{}m left", minutes.max(1))
    }
}

/// Backend timestamps without an offset are UTC
pub fn utc_timestamp(value: &str) -> String {
    let value = value.trim();
    let Some((_, time)) = value.split_once('T') else {
        return value.to_string();
    };
    if time.ends_with('Z') || time.contains('+') || time.contains('-') {
        value.to_string()
    } else {
        format!("{}Z", value)
    }
}

/// Chart range query value, e.g. "1-10"
pub fn range_param(end: u32) -> String {
    format!("1-{}", end.max(1))
}

/// Shorten to `max` characters with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContestStatus;
    use chrono::TimeZone;

    #[test]
    fn test_movement() {
        assert_eq!(movement(5, Some(8), Some(3), Some(10)), Movement::Up(3));
        assert_eq!(movement(8, Some(5), Some(3), Some(10)), Movement::Down(3));
        assert_eq!(movement(4, Some(4), Some(1), Some(30)), Movement::Same);
        assert_eq!(movement(40, None, Some(40), Some(1)), Movement::New);
        assert_eq!(movement(40, None, None, None), Movement::New);
        assert_eq!(movement(40, None, Some(12), Some(9)), Movement::ReEntry);
        assert_eq!(Movement::Up(3).label(), "▲3");
        assert_eq!(Movement::Down(12).label(), "▼12");
        assert_eq!(Movement::ReEntry.label(), "RE-ENTRY");
    }

    #[test]
    fn test_week_labels() {
        assert_eq!(weeks_label(1), "1 week");
        assert_eq!(weeks_label(28), "28 weeks");
        let date = parse_date("2025-03-08").unwrap();
        assert_eq!(week_label(date), "Week of March 8, 2025");
        assert!(parse_date("03/08/2025").is_none());
    }

    #[test]
    fn test_thousands_and_points() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1234), "1,234");
        assert_eq!(thousands(-1234567), "-1,234,567");
        assert_eq!(points_label(1), "1 pt");
        assert_eq!(points_label(1500), "1,500 pts");
    }

    #[test]
    fn test_countdown() {
        let now = Utc.with_ymd_and_hms(2025, 3, 8, 12, 0, 0).unwrap();
        let contest = Contest {
            id: 1,
            start_date: "2025-03-04".into(),
            end_date: "2025-03-10".into(),
            chart_release_date: "2025-03-11".into(),
            status: ContestStatus::Open,
        };
        let deadline = contest_deadline(&contest).unwrap();
        assert_eq!(countdown(now, deadline), "2d 11h left");
        assert_eq!(countdown(now, now + Duration::minutes(90)), "1h 30m left");
        assert_eq!(countdown(now, now + Duration::seconds(20)), "1m left");
        assert_eq!(countdown(now, now - Duration::minutes(1)), "Closed");
    }

    #[test]
    fn test_utc_timestamp() {
        assert_eq!(utc_timestamp("2025-03-01T10:00:00"), "2025-03-01T10:00:00Z");
        assert_eq!(utc_timestamp("2025-03-01T10:00:00Z"), "2025-03-01T10:00:00Z");
        assert_eq!(utc_timestamp("2025-03-01T10:00:00+02:00"), "2025-03-01T10:00:00+02:00");
        assert_eq!(utc_timestamp("2025-03-01T10:00:00-05:00"), "2025-03-01T10:00:00-05:00");
        assert_eq!(utc_timestamp("2025-03-01"), "2025-03-01");
    }

    #[test]
    fn test_truncate_and_range() {
        assert_eq!(truncate("Espresso", 20), "Espresso");
        assert_eq!(truncate("One Of The Girls", 8), "One Of…");
        assert_eq!(range_param(10), "1-10");
        assert_eq!(range_param(0), "1-1");
    }
}
