use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Order slots, in the order the form asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    MenuName,
    MenuQuantity,
    ServingStyle,
    SideMenuChoice,
    SideName,
    SideQuantity,
    DeliveryDate,
    DeliveryTime,
    OrderConfirmation,
}

impl SlotName {
    pub const ALL: [SlotName; 9] = [
        SlotName::MenuName,
        SlotName::MenuQuantity,
        SlotName::ServingStyle,
        SlotName::SideMenuChoice,
        SlotName::SideName,
        SlotName::SideQuantity,
        SlotName::DeliveryDate,
        SlotName::DeliveryTime,
        SlotName::OrderConfirmation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotName::MenuName => "menu_name",
            SlotName::MenuQuantity => "menu_quantity",
            SlotName::ServingStyle => "serving_style",
            SlotName::SideMenuChoice => "side_menu_choice",
            SlotName::SideName => "side_name",
            SlotName::SideQuantity => "side_quantity",
            SlotName::DeliveryDate => "delivery_date",
            SlotName::DeliveryTime => "delivery_time",
            SlotName::OrderConfirmation => "order_confirmation",
        }
    }

    pub fn from_name(name: &str) -> Option<SlotName> {
        SlotName::ALL.into_iter().find(|slot| slot.as_str() == name)
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity the host extracted from the latest user utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity: String,
    #[serde(default)]
    pub value: Value,
}

impl Entity {
    pub fn new(kind: &str, value: &str) -> Self {
        Self {
            entity: kind.to_string(),
            value: Value::String(value.to_string()),
        }
    }

    /// Entity values are usually strings, but extractors may emit numbers.
    pub fn value_text(&self) -> Option<String> {
        match &self.value {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// What the host knows about the user's latest turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Turn {
    pub text: String,
    pub intent: Option<String>,
    pub entities: Vec<Entity>,
}

impl Turn {
    pub fn is_intent(&self, name: &str) -> bool {
        self.intent.as_deref() == Some(name)
    }

    pub fn first_entity(&self, kind: &str) -> Option<String> {
        self.entities
            .iter()
            .find(|e| e.entity == kind)
            .and_then(Entity::value_text)
    }

    /// Last match wins, mirroring how a later entity overwrites an earlier one.
    pub fn last_entity(&self, kind: &str) -> Option<String> {
        self.entities
            .iter()
            .rev()
            .find(|e| e.entity == kind)
            .and_then(Entity::value_text)
    }

    pub fn entities_of(&self, kind: &str) -> Vec<String> {
        self.entities
            .iter()
            .filter(|e| e.entity == kind)
            .filter_map(Entity::value_text)
            .collect()
    }
}

/// Slot values as the host stores them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slots(pub HashMap<String, Value>);

impl Slots {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    pub fn is_filled(&self, slot: SlotName) -> bool {
        self.get(slot.as_str()).is_some()
    }

    pub fn text(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn list(&self, name: &str) -> Option<Vec<String>> {
        match self.get(name)? {
            Value::Array(items) => Some(
                items
                    .iter()
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.0.insert(name.to_string(), value);
    }
}

/// Host-side event emitted by an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    #[serde(rename = "slot")]
    SlotSet {
        timestamp: Option<f64>,
        name: String,
        value: Value,
    },
}

impl Event {
    pub fn slot(name: &str, value: Value) -> Self {
        Event::SlotSet {
            timestamp: None,
            name: name.to_string(),
            value,
        }
    }
}

/// A message shown to the user, optionally with a structured payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotMessage {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_message: Option<Value>,
}

impl BotMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            json_message: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOutcome {
    pub events: Vec<Event>,
    pub messages: Vec<BotMessage>,
}

/// Result of validating one slot candidate.
///
/// `updates` holds every slot the validator decided on, including explicit
/// unsets (`Value::Null`). A single validator may fill more than one slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotValidation {
    pub updates: Vec<(SlotName, Value)>,
    pub messages: Vec<String>,
}

impl SlotValidation {
    pub fn accept(slot: SlotName, value: impl Into<Value>) -> Self {
        Self {
            updates: vec![(slot, value.into())],
            messages: Vec::new(),
        }
    }

    pub fn reject(slot: SlotName, message: impl Into<String>) -> Self {
        Self {
            updates: vec![(slot, Value::Null)],
            messages: vec![message.into()],
        }
    }

    /// Unset without telling the user anything; the host re-asks on its own.
    pub fn unset(slot: SlotName) -> Self {
        Self {
            updates: vec![(slot, Value::Null)],
            messages: Vec::new(),
        }
    }

    pub fn with(mut self, slot: SlotName, value: impl Into<Value>) -> Self {
        self.updates.push((slot, value.into()));
        self
    }

    pub fn value_of(&self, slot: SlotName) -> Option<&Value> {
        self.updates
            .iter()
            .find(|(name, _)| *name == slot)
            .map(|(_, value)| value)
    }

    pub fn is_accepted(&self, slot: SlotName) -> bool {
        self.value_of(slot).is_some_and(|v| !v.is_null())
    }
}

/// Everything an action gets to see for one call from the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionContext {
    pub sender_id: String,
    pub slots: Slots,
    pub turn: Turn,
    /// Slot candidates set during the latest user turn, in the order they were set.
    pub candidates: Vec<(String, Value)>,
    pub requested_slot: Option<String>,
}

/// Accepted range for the main-menu quantity, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityLimits {
    pub min: i64,
    pub max: i64,
}

impl Default for QuantityLimits {
    fn default() -> Self {
        Self { min: 1, max: 100 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}
