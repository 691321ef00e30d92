//! Fallback extraction from raw utterances.
//!
//! Used when the host's extractor produced no entity for a slot. The
//! keyword list decides what counts as a candidate; digit runs always do.
//! A keyword only counts at the start of a word, so "세" inside "주세요"
//! is not read as three.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid digit pattern"));

/// Fold full-width digits (`０`..`９`, common from Korean IMEs) into ASCII.
///
/// Every parser runs its input through this first, so digit patterns only
/// ever need to match `[0-9]`.
pub fn normalize_digits(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_fullwidth_digit) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| {
                if is_fullwidth_digit(c) {
                    char::from(b'0' + (c as u32 - '０' as u32) as u8)
                } else {
                    c
                }
            })
            .collect(),
    )
}

fn is_fullwidth_digit(c: char) -> bool {
    ('０'..='９').contains(&c)
}

/// Regex alternation over literal words, in the given priority order.
pub fn alternation(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

fn starts_word(text: &str, index: usize) -> bool {
    text[..index]
        .chars()
        .next_back()
        .map_or(true, |prev| !is_hangul_syllable(prev))
}

fn keyword_hits(text: &str, keyword: &str) -> Vec<usize> {
    text.match_indices(keyword)
        .map(|(index, _)| index)
        .filter(|index| starts_word(text, *index))
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct TextScanner<'a> {
    keywords: &'a [&'a str],
}

impl<'a> TextScanner<'a> {
    pub fn new(keywords: &'a [&'a str]) -> Self {
        Self { keywords }
    }

    /// First keyword (in list order) present in the text, else the first digit run.
    pub fn first(&self, text: &str) -> Option<String> {
        let text = normalize_digits(text);
        let text: &str = &text;
        self.keywords
            .iter()
            .find(|kw| !keyword_hits(text, kw).is_empty())
            .map(|kw| kw.to_string())
            .or_else(|| DIGITS.find(text).map(|m| m.as_str().to_string()))
    }

    /// Every keyword occurrence and digit run, in the order they appear.
    pub fn all(&self, text: &str) -> Vec<String> {
        let text = normalize_digits(text);
        let text: &str = &text;
        let mut hits: Vec<(usize, String)> = Vec::new();
        for kw in self.keywords {
            hits.extend(keyword_hits(text, kw).into_iter().map(|index| (index, kw.to_string())));
        }
        hits.extend(
            DIGITS
                .find_iter(text)
                .map(|m| (m.start(), m.as_str().to_string())),
        );
        hits.sort_by_key(|(index, _)| *index);
        hits.into_iter().map(|(_, token)| token).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::numeral::QUANTITY_WORDS;

    #[test]
    fn test_first_prefers_keywords_over_digits() {
        let scanner = TextScanner::new(QUANTITY_WORDS);
        assert_eq!(scanner.first("3개 말고 두 개요"), Some("두".to_string()));
        assert_eq!(scanner.first("3개 주세요"), Some("3".to_string()));
        assert_eq!(scanner.first("주세요"), None);
    }

    #[test]
    fn test_first_follows_keyword_order_not_position() {
        let scanner = TextScanner::new(QUANTITY_WORDS);
        // 목록에서 "한"이 "두"보다 앞
        assert_eq!(scanner.first("두 개랑 한 개"), Some("한".to_string()));
    }

    #[test]
    fn test_keywords_inside_words_are_ignored() {
        let scanner = TextScanner::new(QUANTITY_WORDS);
        assert_eq!(scanner.first("그냥 주세요"), None);
        assert_eq!(scanner.first("두개 주세요"), Some("두".to_string()));
    }

    #[test]
    fn test_all_keeps_text_order() {
        let scanner = TextScanner::new(QUANTITY_WORDS);
        assert_eq!(
            scanner.all("빵 두 개랑 샴페인 1병, 커피 12잔"),
            vec!["두".to_string(), "1".to_string(), "12".to_string()]
        );
        assert_eq!(
            scanner.all("빵 두 개랑 샴페인 한 병 주세요"),
            vec!["두".to_string(), "한".to_string()]
        );
        assert_eq!(
            scanner.all("빵 두 개, 콜라 두 병"),
            vec!["두".to_string(), "두".to_string()]
        );
    }

    #[test]
    fn test_fullwidth_digits_are_folded() {
        assert_eq!(normalize_digits("１２월 ８일"), "12월 8일");
        assert!(matches!(normalize_digits("12월 8일"), Cow::Borrowed(_)));

        let scanner = TextScanner::new(QUANTITY_WORDS);
        assert_eq!(scanner.first("２개 주세요"), Some("2".to_string()));
        assert_eq!(
            scanner.all("빵 ３개랑 샴페인 한 병"),
            vec!["3".to_string(), "한".to_string()]
        );
    }

    #[test]
    fn test_other_unicode_digits_are_not_digit_runs() {
        // 아라비아-인도 숫자는 수량으로 보지 않음
        assert_eq!(TextScanner::new(QUANTITY_WORDS).first("٣ 개"), None);
    }

    #[test]
    fn test_alternation_escapes_words() {
        assert_eq!(alternation(&["a.b", "c"]), r"a\.b|c");
    }
}
