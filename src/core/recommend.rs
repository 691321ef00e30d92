use crate::core::catalog::{CHAMPAGNE, ENGLISH, FRENCH, VALENTINE};
use crate::domain::model::{ActionContext, ActionOutcome, BotMessage, MenuEntry};
use crate::domain::ports::Action;
use crate::utils::error::Result;

pub const ACTION_NAME: &str = "action_menu_recommendation";
pub const OCCASION_SLOT: &str = "occasion";

pub struct KeywordRule {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    pub menus: &'static [MenuEntry],
}

/// Checked top to bottom; the first rule with a matching keyword wins.
pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        label: "family",
        keywords: &["생일", "생신", "가족"],
        menus: &[FRENCH, CHAMPAGNE],
    },
    KeywordRule {
        label: "romantic",
        keywords: &[
            "커플", "연인", "여자친구", "남자친구", "애인", "발렌타인", "데이트", "기념일",
        ],
        menus: &[VALENTINE],
    },
    KeywordRule {
        label: "solo",
        keywords: &["브런치", "혼자"],
        menus: &[ENGLISH],
    },
    KeywordRule {
        label: "party",
        keywords: &["파티", "축하"],
        menus: &[CHAMPAGNE],
    },
];

const DEFAULT_MENUS: &[MenuEntry] = &[FRENCH];

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub menus: Vec<MenuEntry>,
    pub message: String,
}

pub fn recommend(occasion: Option<&str>) -> Recommendation {
    let menus: Vec<MenuEntry> = match occasion.filter(|o| !o.is_empty()) {
        Some(occasion) => {
            let occasion = occasion.to_lowercase();
            KEYWORD_RULES
                .iter()
                .find(|rule| rule.keywords.iter().any(|kw| occasion.contains(kw)))
                .map(|rule| {
                    tracing::debug!("occasion matched '{}' rule", rule.label);
                    rule.menus
                })
                .unwrap_or(DEFAULT_MENUS)
                .to_vec()
        }
        None => Vec::new(),
    };

    let message = match menus.as_slice() {
        [] => "어떤 상황인지 다시 알려주시면 메뉴를 추천해 드릴게요!".to_string(),
        [only] => format!("{}를 추천드려요! {}", only.name, only.description),
        many => {
            let names: Vec<&str> = many.iter().map(|m| m.name).collect();
            format!("정말 축하드려요!🎉 {}는 어떠세요?", names.join(" 또는 "))
        }
    };

    Recommendation { menus, message }
}

pub struct RecommendMenuAction;

impl Action for RecommendMenuAction {
    fn name(&self) -> &'static str {
        ACTION_NAME
    }

    fn run(&self, ctx: &ActionContext) -> Result<ActionOutcome> {
        let occasion = ctx.slots.text(OCCASION_SLOT);
        let recommendation = recommend(occasion.as_deref());

        tracing::info!(
            "Recommending {} menu(s) for occasion {:?}",
            recommendation.menus.len(),
            occasion
        );

        Ok(ActionOutcome {
            events: Vec::new(),
            messages: vec![BotMessage::text(recommendation.message)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Slots;
    use serde_json::json;

    #[test]
    fn test_birthday_gets_two_menus() {
        let rec = recommend(Some("엄마 생일이에요"));
        assert_eq!(rec.menus, vec![FRENCH, CHAMPAGNE]);
        assert_eq!(
            rec.message,
            "정말 축하드려요!🎉 프렌치 디너 또는 샴페인 축제 디너는 어떠세요?"
        );
    }

    #[test]
    fn test_date_gets_valentine() {
        let rec = recommend(Some("여자친구랑 데이트"));
        assert_eq!(rec.menus, vec![VALENTINE]);
        assert_eq!(
            rec.message,
            "발렌타인 디너를 추천드려요! 연인을 위한 낭만적인 코스입니다."
        );
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // 가족 규칙이 파티보다 우선
        assert_eq!(recommend(Some("가족 파티")).menus, vec![FRENCH, CHAMPAGNE]);
        assert_eq!(recommend(Some("혼자 브런치")).menus, vec![ENGLISH]);
        assert_eq!(recommend(Some("승진 축하")).menus, vec![CHAMPAGNE]);
    }

    #[test]
    fn test_unmatched_occasion_falls_back_to_default() {
        assert_eq!(recommend(Some("회식")).menus, vec![FRENCH]);
    }

    #[test]
    fn test_missing_occasion_asks_for_clarification() {
        let rec = recommend(None);
        assert!(rec.menus.is_empty());
        assert!(rec.message.contains("다시 알려주시면"));
        assert!(recommend(Some("")).menus.is_empty());
    }

    #[test]
    fn test_action_reads_occasion_slot_and_sets_nothing() {
        let mut slots = Slots::default();
        slots.set(OCCASION_SLOT, json!("기념일"));
        let ctx = ActionContext {
            slots,
            ..Default::default()
        };

        let outcome = RecommendMenuAction.run(&ctx).unwrap();
        assert!(outcome.events.is_empty());
        assert_eq!(outcome.messages.len(), 1);
        assert!(outcome.messages[0].text.starts_with("발렌타인 디너"));
    }
}
