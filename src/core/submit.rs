use crate::domain::model::{ActionContext, ActionOutcome, BotMessage, Event, SlotName, Slots};
use crate::domain::ports::Action;
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt::Write;

pub const ACTION_NAME: &str = "action_submit_order";

/// Structured copy of the receipt, published alongside the text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderData {
    pub menu_name: Option<String>,
    pub menu_quantity: Option<String>,
    pub serving_style: Option<String>,
    pub side_name: Option<Value>,
    pub side_quantity: Option<Value>,
    pub delivery_date: Option<String>,
    pub delivery_time: Option<String>,
}

impl OrderData {
    pub fn from_slots(slots: &Slots) -> Self {
        Self {
            menu_name: slots.text(SlotName::MenuName.as_str()),
            menu_quantity: slots.text(SlotName::MenuQuantity.as_str()),
            serving_style: slots.text(SlotName::ServingStyle.as_str()),
            side_name: slots.get(SlotName::SideName.as_str()).cloned(),
            side_quantity: slots.get(SlotName::SideQuantity.as_str()).cloned(),
            delivery_date: slots.text(SlotName::DeliveryDate.as_str()),
            delivery_time: slots.text(SlotName::DeliveryTime.as_str()),
        }
    }
}

fn show(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn side_lines(slots: &Slots) -> Vec<String> {
    match (
        slots.list(SlotName::SideName.as_str()),
        slots.list(SlotName::SideQuantity.as_str()),
    ) {
        (Some(names), Some(quantities)) => names
            .iter()
            .zip(quantities.iter())
            .map(|(name, qty)| format!("  📌 {} {}개", name, qty))
            .collect(),
        _ => match (
            slots.text(SlotName::SideName.as_str()),
            slots.text(SlotName::SideQuantity.as_str()),
        ) {
            (Some(name), Some(qty)) => vec![format!("  📌 {} {}개", name, qty)],
            _ => Vec::new(),
        },
    }
}

/// Render the customer-facing receipt.
pub fn render_receipt(slots: &Slots, order: &OrderData) -> String {
    let mut message = String::from("주문이 완료되었습니다!\n\n");
    let _ = writeln!(message, "📋 주문 내역");
    let _ = writeln!(message, "  📌 메뉴: {}", show(&order.menu_name));
    let _ = writeln!(message, "  📌 수량: {}개", show(&order.menu_quantity));
    let _ = writeln!(message, "  📌 서빙 스타일: {}", show(&order.serving_style));

    let sides = side_lines(slots);
    if !sides.is_empty() {
        let _ = writeln!(message, "\n🍽️ 사이드 메뉴");
        for line in sides {
            let _ = writeln!(message, "{}", line);
        }
    }

    let _ = writeln!(message, "\n📦 배송 정보");
    let _ = writeln!(message, "  📌 날짜: {}", show(&order.delivery_date));
    let _ = writeln!(message, "  📌 시간: {}", show(&order.delivery_time));
    message.push_str("\n감사합니다! 맛있게 드세요 😊");
    message
}

/// Emits the receipt, then clears the order so the next one starts clean.
pub struct SubmitOrderAction;

impl Action for SubmitOrderAction {
    fn name(&self) -> &'static str {
        ACTION_NAME
    }

    fn run(&self, ctx: &ActionContext) -> Result<ActionOutcome> {
        let order = OrderData::from_slots(&ctx.slots);
        let text = render_receipt(&ctx.slots, &order);

        tracing::info!(
            "🧾 Order submitted for {}: {} x {}",
            ctx.sender_id,
            show(&order.menu_name),
            show(&order.menu_quantity)
        );

        let payload = json!({ "order_data": serde_json::to_value(&order)? });

        let events = SlotName::ALL
            .iter()
            .map(|slot| Event::slot(slot.as_str(), Value::Null))
            .collect();

        Ok(ActionOutcome {
            events,
            messages: vec![BotMessage {
                text,
                json_message: Some(payload),
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_slots() -> Slots {
        let mut slots = Slots::default();
        slots.set("menu_name", json!("샴페인 축제 디너"));
        slots.set("menu_quantity", json!("2"));
        slots.set("serving_style", json!("그랜드 스타일"));
        slots.set("side_menu_choice", json!("yes"));
        slots.set("side_name", json!(["빵", "샴페인"]));
        slots.set("side_quantity", json!(["2", "1"]));
        slots.set("delivery_date", json!("2026-10-15"));
        slots.set("delivery_time", json!("19:00:00"));
        slots.set("order_confirmation", json!(true));
        slots
    }

    #[test]
    fn test_receipt_contains_every_value() {
        let ctx = ActionContext {
            sender_id: "user-1".to_string(),
            slots: filled_slots(),
            ..Default::default()
        };
        let outcome = SubmitOrderAction.run(&ctx).unwrap();
        let text = &outcome.messages[0].text;

        for expected in [
            "메뉴: 샴페인 축제 디너",
            "수량: 2개",
            "서빙 스타일: 그랜드 스타일",
            "📌 빵 2개",
            "📌 샴페인 1개",
            "날짜: 2026-10-15",
            "시간: 19:00:00",
        ] {
            assert!(text.contains(expected), "missing '{}' in {}", expected, text);
        }
    }

    #[test]
    fn test_payload_keys_match_schema() {
        let ctx = ActionContext {
            slots: filled_slots(),
            ..Default::default()
        };
        let outcome = SubmitOrderAction.run(&ctx).unwrap();
        let payload = outcome.messages[0].json_message.as_ref().unwrap();
        let order = payload["order_data"].as_object().unwrap();

        let mut keys: Vec<&str> = order.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "delivery_date",
                "delivery_time",
                "menu_name",
                "menu_quantity",
                "serving_style",
                "side_name",
                "side_quantity"
            ]
        );
        assert_eq!(order["side_quantity"], json!(["2", "1"]));
    }

    #[test]
    fn test_all_order_slots_cleared() {
        let outcome = SubmitOrderAction.run(&ActionContext::default()).unwrap();
        assert_eq!(outcome.events.len(), SlotName::ALL.len());
        for (event, slot) in outcome.events.iter().zip(SlotName::ALL) {
            assert_eq!(event, &Event::slot(slot.as_str(), Value::Null));
        }
    }

    #[test]
    fn test_receipt_without_sides_skips_section() {
        let mut slots = filled_slots();
        slots.set("side_name", Value::Null);
        slots.set("side_quantity", Value::Null);
        let order = OrderData::from_slots(&slots);
        let text = render_receipt(&slots, &order);
        assert!(!text.contains("사이드 메뉴"));
        assert!(text.ends_with("맛있게 드세요 😊"));
    }
}
