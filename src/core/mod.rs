pub mod catalog;
pub mod date;
pub mod engine;
pub mod form;
pub mod numeral;
pub mod recommend;
pub mod submit;
pub mod text_scan;
pub mod time;

pub use crate::domain::model::{ActionContext, ActionOutcome, SlotName, Slots, Turn};
pub use crate::domain::ports::{Action, Clock};
pub use crate::utils::error::Result;
