//! Order form slot validation.
//!
//! Each validator gets the candidate value for its slot plus the latest turn
//! and decides the slot (and sometimes a neighbouring slot). Failures never
//! escape as errors: they unset the slot and tell the user how to answer.

use crate::core::catalog::{menu_mentioned_in, style_mentioned_in};
use crate::core::date::parse_korean_date;
use crate::core::numeral::{parse_quantity, QUANTITY_WORDS};
use crate::core::text_scan::TextScanner;
use crate::core::time::{extract_time_phrase, parse_korean_time};
use crate::domain::model::{
    ActionContext, ActionOutcome, BotMessage, Event, QuantityLimits, SlotName, SlotValidation, Slots,
    Turn,
};
use crate::domain::ports::{Action, Clock};
use crate::utils::error::Result;
use serde_json::Value;
use std::sync::Arc;

pub const ACTION_NAME: &str = "validate_order_form";
pub const REQUESTED_SLOT: &str = "requested_slot";

pub const INTENT_SELECT_SIDE_MENU: &str = "select_side_menu";
pub const INTENT_DENY: &str = "deny";
pub const INTENT_AFFIRM: &str = "affirm";

const NO_SIDE_KEYWORDS: [&str; 3] = ["필요없", "안할", "괜찮"];

const MSG_INVALID_MENU: &str = "죄송합니다. 유효한 메뉴를 선택해주세요.";
const MSG_INVALID_QUANTITY: &str = "올바른 수량을 입력해주세요. (예: 2개, 두 개)";
const MSG_INVALID_STYLE: &str = "서빙 스타일을 다시 선택해주세요. (심플/디럭스/그랜드)";
const MSG_SIDE_DETAILS: &str = "사이드 메뉴와 수량을 함께 알려주세요. (예: 빵 두 개랑 샴페인 한 병)";
const MSG_ASK_SIDE: &str = "사이드 메뉴를 추가하시겠어요?";
const MSG_ASK_DATE: &str = "원하시는 배송 일시를 알려주세요!";
const MSG_INVALID_DATE: &str = "올바른 날짜 형식을 입력해주세요. (예: 내일, 모레, 12월 8일)";
const MSG_ASK_TIME: &str = "올바른 시간을 입력해주세요. (예: 6시, 7시 30분)";
const MSG_INVALID_TIME: &str = "올바른 시간 형식을 입력해주세요. (예: 6시, 7시 30분)";
const MSG_MORE_REQUESTS: &str = "추가로 필요하신 사항을 말씀해주세요.";

type SlotValidator = fn(&OrderForm, &Value, &Turn) -> SlotValidation;

/// Required slots in asking order, each with its validator.
const FORM_SLOTS: [(SlotName, SlotValidator); 7] = [
    (SlotName::MenuName, OrderForm::validate_menu_name),
    (SlotName::MenuQuantity, OrderForm::validate_menu_quantity),
    (SlotName::ServingStyle, OrderForm::validate_serving_style),
    (SlotName::SideMenuChoice, OrderForm::validate_side_menu_choice),
    (SlotName::DeliveryDate, OrderForm::validate_delivery_date),
    (SlotName::DeliveryTime, OrderForm::validate_delivery_time),
    (SlotName::OrderConfirmation, OrderForm::validate_order_confirmation),
];

pub fn required_slots() -> impl Iterator<Item = SlotName> {
    FORM_SLOTS.iter().map(|(slot, _)| *slot)
}

/// First required slot the host still has to ask for.
pub fn next_requested_slot(slots: &Slots) -> Option<SlotName> {
    required_slots().find(|slot| !slots.is_filled(*slot))
}

fn candidate_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub struct OrderForm {
    clock: Arc<dyn Clock>,
    limits: QuantityLimits,
}

impl OrderForm {
    pub fn new(clock: Arc<dyn Clock>, limits: QuantityLimits) -> Self {
        Self { clock, limits }
    }

    pub fn validator_for(slot: SlotName) -> Option<SlotValidator> {
        FORM_SLOTS
            .iter()
            .find(|(name, _)| *name == slot)
            .map(|(_, validator)| *validator)
    }

    pub fn validate(&self, slot: SlotName, candidate: &Value, turn: &Turn) -> Option<SlotValidation> {
        let validator = Self::validator_for(slot)?;
        let validation = validator(self, candidate, turn);
        if validation.is_accepted(slot) {
            tracing::debug!("✅ {} accepted: {:?}", slot, validation.value_of(slot));
        } else {
            tracing::debug!("↩️ {} left unset for candidate {:?}", slot, candidate);
        }
        Some(validation)
    }

    pub fn validate_menu_name(&self, candidate: &Value, _turn: &Turn) -> SlotValidation {
        match candidate_text(candidate) {
            Some(text) if menu_mentioned_in(&text).is_some() => {
                SlotValidation::accept(SlotName::MenuName, text)
            }
            _ => SlotValidation::reject(SlotName::MenuName, MSG_INVALID_MENU),
        }
    }

    pub fn validate_menu_quantity(&self, _candidate: &Value, turn: &Turn) -> SlotValidation {
        let raw = turn
            .first_entity("menu_quantity")
            .or_else(|| TextScanner::new(QUANTITY_WORDS).first(&turn.text));

        let Some(quantity) = raw.as_deref().and_then(parse_quantity) else {
            return SlotValidation::reject(SlotName::MenuQuantity, MSG_INVALID_QUANTITY);
        };

        if quantity < self.limits.min || quantity > self.limits.max {
            return SlotValidation::reject(
                SlotName::MenuQuantity,
                format!(
                    "수량은 {}개에서 {}개 사이로 주문해주세요.",
                    self.limits.min, self.limits.max
                ),
            );
        }

        SlotValidation::accept(SlotName::MenuQuantity, quantity.to_string())
    }

    pub fn validate_serving_style(&self, candidate: &Value, _turn: &Turn) -> SlotValidation {
        match candidate_text(candidate) {
            Some(text) if style_mentioned_in(&text).is_some() => {
                SlotValidation::accept(SlotName::ServingStyle, text)
            }
            _ => SlotValidation::reject(SlotName::ServingStyle, MSG_INVALID_STYLE),
        }
    }

    pub fn validate_side_menu_choice(&self, candidate: &Value, turn: &Turn) -> SlotValidation {
        if turn.is_intent(INTENT_SELECT_SIDE_MENU) {
            return self.select_side_items(turn);
        }

        let declined_in_text = candidate_text(candidate)
            .unwrap_or_else(|| turn.text.clone())
            .to_lowercase();
        let declined = NO_SIDE_KEYWORDS.iter().any(|kw| declined_in_text.contains(kw));

        if turn.is_intent(INTENT_DENY) || declined {
            return SlotValidation::accept(SlotName::SideMenuChoice, "no")
                .with(SlotName::SideName, Value::Null)
                .with(SlotName::SideQuantity, Value::Null);
        }

        SlotValidation::reject(SlotName::SideMenuChoice, MSG_ASK_SIDE)
    }

    fn select_side_items(&self, turn: &Turn) -> SlotValidation {
        let names = turn.entities_of("side_name");
        let mut raw_quantities = turn.entities_of("side_quantity");
        if raw_quantities.is_empty() {
            raw_quantities = TextScanner::new(QUANTITY_WORDS).all(&turn.text);
        }

        let quantities: Vec<String> = raw_quantities
            .iter()
            .filter_map(|raw| parse_quantity(raw))
            .map(|q| q.to_string())
            .collect();

        if names.is_empty() || quantities.is_empty() || names.len() != quantities.len() {
            tracing::debug!(
                "side items not paired: {} name(s), {} quantity(ies)",
                names.len(),
                quantities.len()
            );
            return SlotValidation::reject(SlotName::SideMenuChoice, MSG_SIDE_DETAILS);
        }

        SlotValidation::accept(SlotName::SideMenuChoice, "yes")
            .with(SlotName::SideName, names)
            .with(SlotName::SideQuantity, quantities)
    }

    pub fn validate_delivery_date(&self, _candidate: &Value, turn: &Turn) -> SlotValidation {
        let Some(date_text) = turn.last_entity("date") else {
            return SlotValidation::reject(SlotName::DeliveryDate, MSG_ASK_DATE);
        };

        let today = self.clock.now().date_naive();
        let date = match parse_korean_date(&date_text, today) {
            Ok(date) => date,
            Err(e) => {
                tracing::debug!("date '{}' rejected: {}", date_text, e);
                return SlotValidation::reject(SlotName::DeliveryDate, MSG_INVALID_DATE);
            }
        };

        let mut validation = SlotValidation::accept(SlotName::DeliveryDate, date);

        // "내일 7시"처럼 한 번에 날짜와 시간을 채움
        if let Some(time_text) = turn.last_entity("time") {
            let time = parse_korean_time(&time_text);
            if time != time_text.trim() {
                validation = validation.with(SlotName::DeliveryTime, time);
            }
        }

        validation
    }

    pub fn validate_delivery_time(&self, _candidate: &Value, turn: &Turn) -> SlotValidation {
        let Some(time_text) = turn
            .first_entity("time")
            .or_else(|| extract_time_phrase(&turn.text))
        else {
            return SlotValidation::reject(SlotName::DeliveryTime, MSG_ASK_TIME);
        };

        let time = parse_korean_time(&time_text);
        if time == time_text.trim() {
            return SlotValidation::reject(SlotName::DeliveryTime, MSG_INVALID_TIME);
        }

        SlotValidation::accept(SlotName::DeliveryTime, time)
    }

    /// The form closes by asking "anything else?", so "no" confirms the order.
    pub fn validate_order_confirmation(&self, _candidate: &Value, turn: &Turn) -> SlotValidation {
        if turn.is_intent(INTENT_DENY) {
            SlotValidation::accept(SlotName::OrderConfirmation, true)
        } else if turn.is_intent(INTENT_AFFIRM) {
            SlotValidation::reject(SlotName::OrderConfirmation, MSG_MORE_REQUESTS)
        } else {
            SlotValidation::unset(SlotName::OrderConfirmation)
        }
    }
}

/// Validation action the host calls after every user turn while the form is active.
pub struct ValidateOrderFormAction {
    form: OrderForm,
}

impl ValidateOrderFormAction {
    pub fn new(form: OrderForm) -> Self {
        Self { form }
    }

    fn candidates(ctx: &ActionContext) -> Vec<(String, Value)> {
        if !ctx.candidates.is_empty() {
            return ctx.candidates.clone();
        }

        // 추출된 슬롯이 없으면 원문을 요청 중인 슬롯의 후보로 사용
        ctx.requested_slot
            .as_deref()
            .and_then(SlotName::from_name)
            .filter(|slot| OrderForm::validator_for(*slot).is_some())
            .map(|slot| vec![(slot.as_str().to_string(), Value::String(ctx.turn.text.clone()))])
            .unwrap_or_default()
    }
}

impl Action for ValidateOrderFormAction {
    fn name(&self) -> &'static str {
        ACTION_NAME
    }

    fn run(&self, ctx: &ActionContext) -> Result<ActionOutcome> {
        let mut slots = ctx.slots.clone();
        let mut outcome = ActionOutcome::default();

        for (name, value) in Self::candidates(ctx) {
            let validation = SlotName::from_name(&name)
                .and_then(|slot| self.form.validate(slot, &value, &ctx.turn));

            match validation {
                Some(validation) => {
                    for (slot, value) in validation.updates {
                        slots.set(slot.as_str(), value.clone());
                        outcome.events.push(Event::slot(slot.as_str(), value));
                    }
                    outcome
                        .messages
                        .extend(validation.messages.into_iter().map(BotMessage::text));
                }
                None => {
                    // 폼 슬롯이 아니면 호스트 값 그대로
                    slots.set(&name, value.clone());
                    outcome.events.push(Event::slot(&name, value));
                }
            }
        }

        let next = next_requested_slot(&slots);
        tracing::debug!("next requested slot: {:?}", next);
        outcome.events.push(Event::slot(
            REQUESTED_SLOT,
            next.map_or(Value::Null, |slot| Value::String(slot.as_str().to_string())),
        ));

        Ok(outcome)
    }
}
