//! Orders heterogeneous records by a field named at runtime, plus the small collaborators the
//! display layer uses next to it.

pub mod config;
pub mod dialog;
pub mod key;
pub mod menu;
pub mod month;
pub mod order;
pub mod patterns;
pub mod record;
pub mod stable;

pub use config::{ConfigError, OrderConfig};
pub use key::{FalsyPolicy, DEFAULT_SENTINEL};
pub use order::{
    order_by_field, order_by_field_with, order_option, order_value, order_value_with, Comparison,
};
pub use record::{FieldAccess, FieldValue};
