use crate::domain::model::{ActionContext, ActionOutcome, QuantityLimits};
use crate::utils::error::Result;
use chrono::{DateTime, FixedOffset};

/// Source of "now" for date resolution. Injected so parsing never reads
/// ambient wall-clock or timezone state.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// A callback the dialogue host can invoke by name.
pub trait Action: Send + Sync {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &ActionContext) -> Result<ActionOutcome>;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn utc_offset_hours(&self) -> i32;
    fn quantity_limits(&self) -> QuantityLimits;
}
