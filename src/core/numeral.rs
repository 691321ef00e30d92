//! Korean numeral words to integers.
//!
//! Covers both the native (하나, 둘, 스물...) and Sino-Korean (일, 이, 이십...)
//! readings. Compound forms are resolved one level deep only: a table prefix
//! plus a table (or digit) remainder. "백이십" parses, "백이십일" does not.

use crate::core::text_scan::normalize_digits;
use once_cell::sync::Lazy;

/// Order matters: equal-length prefixes are tried in this order.
const KOREAN_NUMBERS: &[(&str, u32)] = &[
    ("영", 0),
    ("공", 0),
    ("하나", 1),
    ("한", 1),
    ("일", 1),
    ("둘", 2),
    ("두", 2),
    ("이", 2),
    ("셋", 3),
    ("세", 3),
    ("삼", 3),
    ("넷", 4),
    ("네", 4),
    ("사", 4),
    ("다섯", 5),
    ("오", 5),
    ("여섯", 6),
    ("육", 6),
    ("륙", 6),
    ("일곱", 7),
    ("칠", 7),
    ("여덟", 8),
    ("팔", 8),
    ("아홉", 9),
    ("구", 9),
    ("열", 10),
    ("십", 10),
    ("스물", 20),
    ("이십", 20),
    ("서른", 30),
    ("삼십", 30),
    ("마흔", 40),
    ("사십", 40),
    ("쉰", 50),
    ("오십", 50),
    ("예순", 60),
    ("육십", 60),
    ("일흔", 70),
    ("칠십", 70),
    ("여든", 80),
    ("팔십", 80),
    ("아흔", 90),
    ("구십", 90),
    ("백", 100),
    ("천", 1000),
];

/// Quantity words looked for in free text when no entity was extracted.
pub const QUANTITY_WORDS: &[&str] = &[
    "하나", "한", "둘", "두", "셋", "세", "넷", "네", "다섯", "여섯", "일곱", "여덟", "아홉", "열",
];

static PREFIXES_LONGEST_FIRST: Lazy<Vec<(&'static str, u32)>> = Lazy::new(|| {
    let mut entries = KOREAN_NUMBERS.to_vec();
    // 안정 정렬: 길이가 같으면 표 순서 유지
    entries.sort_by_key(|(word, _)| std::cmp::Reverse(word.chars().count()));
    entries
});

fn lookup(word: &str) -> Option<u32> {
    KOREAN_NUMBERS
        .iter()
        .find(|(key, _)| *key == word)
        .map(|(_, value)| *value)
}

fn parse_digits(text: &str) -> Option<u32> {
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

/// Parse a digit string or Korean numeral word. `None` means "not a number".
pub fn parse_korean_number(text: &str) -> Option<u32> {
    let text = normalize_digits(text.trim());
    let text: &str = &text;

    if let Some(value) = parse_digits(text) {
        return Some(value);
    }

    if let Some(value) = lookup(text) {
        return Some(value);
    }

    for (key, value) in PREFIXES_LONGEST_FIRST.iter() {
        if let Some(remainder) = text.strip_prefix(key) {
            if let Some(rest) = lookup(remainder) {
                return Some(value + rest);
            }
            if let Some(rest) = parse_digits(remainder) {
                return value.checked_add(rest);
            }
        }
    }

    None
}

/// Numeral parse with a plain signed-integer fallback, for quantities.
pub fn parse_quantity(text: &str) -> Option<i64> {
    parse_korean_number(text)
        .map(i64::from)
        .or_else(|| normalize_digits(text.trim()).parse::<i64>().ok())
}
