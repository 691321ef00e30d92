use crate::core::text_scan::normalize_digits;
use crate::utils::error::{ActionError, Result};
use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static THIS_WEEK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"이번\s*주\s*([월화수목금토일])요일").expect("valid pattern"));
static NEXT_WEEK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"다음\s*주\s*([월화수목금토일])요일").expect("valid pattern"));
static MONTH_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)월\s*([0-9]+)일").expect("valid pattern"));

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Monday = 0 .. Sunday = 6
fn weekday_index(day: &str) -> Option<i64> {
    let index = match day {
        "월" => 0,
        "화" => 1,
        "수" => 2,
        "목" => 3,
        "금" => 4,
        "토" => 5,
        "일" => 6,
        _ => return None,
    };
    Some(index)
}

fn iso(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Resolve a Korean date phrase against `today` into "yyyy-mm-dd".
///
/// Rules, first match wins:
/// - 오늘 / 내일 / 모레: today, +1, +2 days
/// - 이번 주 X요일: next occurrence this week, rolling to next week when the
///   weekday is today or already passed
/// - 다음 주 X요일: this week's occurrence plus seven days
/// - M월 D일: that day this year, or next year if it already passed
///
/// Text matching none of these comes back unchanged. A month/day that does not
/// exist on the calendar is [`ActionError::InvalidDate`].
pub fn parse_korean_date(text: &str, today: NaiveDate) -> Result<String> {
    let text = text.trim();
    let normalized = normalize_digits(text);

    if text.contains("오늘") {
        return Ok(iso(today));
    }
    if text.contains("내일") {
        return Ok(iso(today + Duration::days(1)));
    }
    if text.contains("모레") {
        return Ok(iso(today + Duration::days(2)));
    }

    let current = i64::from(today.weekday().num_days_from_monday());

    if let Some(target) = THIS_WEEK
        .captures(text)
        .and_then(|caps| weekday_index(&caps[1]))
    {
        let mut days_ahead = target - current;
        if days_ahead <= 0 {
            days_ahead += 7;
        }
        return Ok(iso(today + Duration::days(days_ahead)));
    }

    if let Some(target) = NEXT_WEEK
        .captures(text)
        .and_then(|caps| weekday_index(&caps[1]))
    {
        let days_ahead = target - current + 7;
        return Ok(iso(today + Duration::days(days_ahead)));
    }

    if let Some(caps) = MONTH_DAY.captures(&normalized) {
        // u32에 안 들어가는 숫자는 날짜 표현으로 보지 않음
        let (Ok(month), Ok(day)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
            return Ok(text.to_string());
        };
        let invalid = || ActionError::InvalidDate { month, day };

        let this_year = NaiveDate::from_ymd_opt(today.year(), month, day).ok_or_else(invalid)?;
        if this_year >= today {
            return Ok(iso(this_year));
        }
        let next_year = NaiveDate::from_ymd_opt(today.year() + 1, month, day).ok_or_else(invalid)?;
        return Ok(iso(next_year));
    }

    Ok(text.to_string())
}
