use crate::core::numeral::parse_korean_number;
use crate::core::text_scan::{alternation, normalize_digits};
use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\s*시(?:\s*([0-9]+)\s*분)?").expect("valid time pattern"));

/// Hour words accepted in "여섯 시" style phrases, longer compounds after their stems.
pub const HOUR_WORDS: &[&str] = &[
    "하나", "한", "둘", "두", "셋", "세", "넷", "네", "다섯", "여섯", "일곱", "여덟", "아홉", "열",
    "열하나", "열한", "열둘", "열두",
];

static KOREAN_HOUR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"({})\s*시", alternation(HOUR_WORDS))).expect("valid hour pattern")
});

/// Convert "6시" / "6시 30분" into "HH:MM:SS".
///
/// Orders are evening deliveries, so any hour below 12 is read as PM. Text
/// without a recognizable pattern is returned unchanged.
pub fn parse_korean_time(text: &str) -> String {
    let text = text.trim();
    let normalized = normalize_digits(text);

    let Some(caps) = NUMERIC_TIME.captures(&normalized) else {
        return text.to_string();
    };

    let Ok(mut hour) = caps[1].parse::<u32>() else {
        return text.to_string();
    };
    let minute = match caps.get(2) {
        Some(m) => match m.as_str().parse::<u32>() {
            Ok(minute) => minute,
            Err(_) => return text.to_string(),
        },
        None => 0,
    };

    if hour < 12 {
        hour += 12;
    }

    format!("{:02}:{:02}:00", hour, minute)
}

/// Pull a time phrase out of a raw utterance when the host extracted no
/// time entity. Numeric hours are preferred over spelled-out ones; the
/// result is normalized to "N시" or "N시 M분" for [`parse_korean_time`].
pub fn extract_time_phrase(text: &str) -> Option<String> {
    let text = normalize_digits(text);
    let text: &str = &text;

    if let Some(caps) = NUMERIC_TIME.captures(text) {
        let hour = &caps[1];
        return Some(match caps.get(2) {
            Some(minute) if minute.as_str() != "00" => format!("{}시 {}분", hour, minute.as_str()),
            _ => format!("{}시", hour),
        });
    }

    let caps = KOREAN_HOUR.captures(text)?;
    match parse_korean_number(&caps[1]) {
        Some(hour) if hour > 0 => Some(format!("{}시", hour)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_are_biased_to_pm() {
        assert_eq!(parse_korean_time("6시"), "18:00:00");
        assert_eq!(parse_korean_time("6시 30분"), "18:30:00");
        assert_eq!(parse_korean_time("0시"), "12:00:00");
    }

    #[test]
    fn test_afternoon_hours_kept() {
        assert_eq!(parse_korean_time("14시"), "14:00:00");
        assert_eq!(parse_korean_time("12시 5분"), "12:05:00");
    }

    #[test]
    fn test_pattern_found_inside_sentence() {
        assert_eq!(parse_korean_time("저녁 7시30분쯤 부탁해요"), "19:30:00");
    }

    #[test]
    fn test_unrecognized_text_returned_unchanged() {
        assert_eq!(parse_korean_time(" 저녁에 "), "저녁에");
        assert_eq!(parse_korean_time("여섯 시"), "여섯 시");
    }

    #[test]
    fn test_fullwidth_digits() {
        assert_eq!(parse_korean_time("６시"), "18:00:00");
        assert_eq!(parse_korean_time("７시 ３０분"), "19:30:00");
        assert_eq!(extract_time_phrase("６시에 주세요"), Some("6시".to_string()));
    }

    #[test]
    fn test_extract_numeric_phrase() {
        assert_eq!(extract_time_phrase("7시에 와주세요"), Some("7시".to_string()));
        assert_eq!(
            extract_time_phrase("7시 30분에 와주세요"),
            Some("7시 30분".to_string())
        );
        assert_eq!(extract_time_phrase("7시 00분"), Some("7시".to_string()));
    }

    #[test]
    fn test_extract_korean_hour() {
        assert_eq!(extract_time_phrase("여섯 시에 받을게요"), Some("6시".to_string()));
        assert_eq!(extract_time_phrase("열한시"), Some("11시".to_string()));
        assert_eq!(extract_time_phrase("열두 시"), Some("12시".to_string()));
        assert_eq!(extract_time_phrase("저녁에 주세요"), None);
    }
}
