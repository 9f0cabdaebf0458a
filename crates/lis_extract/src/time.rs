use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Convert a relative-time token like "5h", "2d", "1w", "3mo" or "1y" into an
/// absolute timestamp, using `now` as the reference point.
///
/// Hour-scale tokens keep `now`'s exact minute; day-scale and larger snap to
/// 09:00 because the feed stops exposing a time-of-day past the same day.
/// Months count as 30 days and years as 365. Tokens that are neither relative
/// times nor long-form dates ("August 25, 2023") fall back to `now` — this
/// function never fails.
pub fn normalize(token: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let token = token.trim();
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    let unit: String = token[digits.len()..]
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();

    if digits.is_empty() || unit.is_empty() {
        return parse_long_form(token).unwrap_or(now);
    }

    let quantity = match digits.parse::<i64>() {
        Ok(quantity) => quantity,
        Err(_) => return now,
    };

    match unit.to_ascii_lowercase().as_str() {
        "h" | "hr" | "hrs" => Duration::try_hours(quantity)
            .and_then(|delta| now.checked_sub_signed(delta))
            .unwrap_or(now),
        "d" | "day" | "days" => days_before(now, Some(quantity)),
        "w" | "wk" | "wks" => days_before(now, quantity.checked_mul(7)),
        "mo" | "mos" | "month" | "months" => days_before(now, quantity.checked_mul(30)),
        "y" | "yr" | "yrs" => days_before(now, quantity.checked_mul(365)),
        _ => now,
    }
}

/// Subtract `days` from `now` and snap the result to the canonical 09:00.
fn days_before(now: DateTime<Utc>, days: Option<i64>) -> DateTime<Utc> {
    days.and_then(Duration::try_days)
        .and_then(|delta| now.checked_sub_signed(delta))
        .and_then(|posted| posted.date_naive().and_hms_opt(9, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or(now)
}

fn parse_long_form(token: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(token, "%B %d, %Y")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_hours_keep_minute() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 34, 0).unwrap();
        let posted = normalize("5h", now);
        assert_eq!(posted, Utc.with_ymd_and_hms(2024, 1, 10, 7, 34, 0).unwrap());
    }

    #[test]
    fn test_hour_unit_variants() {
        let now = reference();
        assert_eq!(normalize("3hr", now), normalize("3hrs", now));
        assert_eq!(normalize("3h", now), Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_days_snap_to_nine() {
        let posted = normalize("2d", reference());
        assert_eq!(posted, Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_weeks_are_seven_days() {
        let posted = normalize("1w", reference());
        assert_eq!(posted, Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_months_are_thirty_days() {
        let posted = normalize("3mo", reference());
        assert_eq!(posted, Utc.with_ymd_and_hms(2023, 10, 12, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_years_are_365_days() {
        let posted = normalize("1y", reference());
        assert_eq!(posted, Utc.with_ymd_and_hms(2023, 1, 10, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        let now = reference();
        assert_eq!(normalize("5h ago", now), normalize("5h", now));
    }

    #[test]
    fn test_long_form_date() {
        let posted = normalize("August 25, 2023", reference());
        assert_eq!(posted, Utc.with_ymd_and_hms(2023, 8, 25, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_unknown_unit_falls_back_to_now() {
        let now = reference();
        assert_eq!(normalize("45m", now), now);
        assert_eq!(normalize("2fortnights", now), now);
    }

    #[test]
    fn test_unparseable_falls_back_to_now() {
        let now = reference();
        assert_eq!(normalize("", now), now);
        assert_eq!(normalize("Edited", now), now);
        assert_eq!(normalize("5", now), now);
        assert_eq!(normalize("h5", now), now);
        assert_eq!(normalize("Not A Date, ever", now), now);
    }

    #[test]
    fn test_huge_quantities_fall_back_to_now() {
        let now = reference();
        assert_eq!(normalize("99999999999999999999999h", now), now);
        assert_eq!(normalize("9223372036854775807y", now), now);
    }
}
