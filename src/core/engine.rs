use crate::core::form::{OrderForm, ValidateOrderFormAction};
use crate::core::recommend::RecommendMenuAction;
use crate::core::submit::SubmitOrderAction;
use crate::domain::model::{ActionContext, ActionOutcome, QuantityLimits};
use crate::domain::ports::{Action, Clock};
use crate::utils::error::{ActionError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Looks actions up by the name the host sends and runs them.
pub struct ActionEngine {
    actions: BTreeMap<&'static str, Box<dyn Action>>,
}

impl ActionEngine {
    pub fn new() -> Self {
        Self {
            actions: BTreeMap::new(),
        }
    }

    /// Engine with every order-bot action registered.
    pub fn with_order_actions(clock: Arc<dyn Clock>, limits: QuantityLimits) -> Self {
        let mut engine = Self::new();
        engine.register(RecommendMenuAction);
        engine.register(ValidateOrderFormAction::new(OrderForm::new(clock, limits)));
        engine.register(SubmitOrderAction);
        engine
    }

    pub fn register<A: Action + 'static>(&mut self, action: A) {
        let name = action.name();
        if self.actions.insert(name, Box::new(action)).is_some() {
            tracing::warn!("Action '{}' registered twice, keeping the latest", name);
        }
    }

    pub fn action_names(&self) -> Vec<&'static str> {
        self.actions.keys().copied().collect()
    }

    pub fn run(&self, name: &str, ctx: &ActionContext) -> Result<ActionOutcome> {
        let action = self
            .actions
            .get(name)
            .ok_or_else(|| ActionError::UnknownAction {
                name: name.to_string(),
            })?;

        let _span = tracing::info_span!("action", name, sender = %ctx.sender_id).entered();
        tracing::info!("▶️ Running {}", name);
        let outcome = action.run(ctx)?;
        tracing::debug!(
            "{} produced {} event(s), {} message(s)",
            name,
            outcome.events.len(),
            outcome.messages.len()
        );

        Ok(outcome)
    }
}

impl Default for ActionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;

    fn engine() -> ActionEngine {
        ActionEngine::with_order_actions(
            Arc::new(FixedClock::seoul(2026, 10, 14, 15, 0).unwrap()),
            QuantityLimits::default(),
        )
    }

    #[test]
    fn test_registered_action_names() {
        assert_eq!(
            engine().action_names(),
            vec![
                "action_menu_recommendation",
                "action_submit_order",
                "validate_order_form"
            ]
        );
    }

    #[test]
    fn test_unknown_action() {
        let err = engine()
            .run("action_unknown", &ActionContext::default())
            .unwrap_err();
        assert!(matches!(err, ActionError::UnknownAction { ref name } if name == "action_unknown"));
    }

    #[test]
    fn test_runs_registered_action() {
        let outcome = engine()
            .run("action_menu_recommendation", &ActionContext::default())
            .unwrap();
        assert_eq!(outcome.messages.len(), 1);
    }
}
