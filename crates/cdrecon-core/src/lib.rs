pub mod domain;
pub mod dto;
pub mod error;
pub mod reconcile;
pub mod rules;
pub mod time;

pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use reconcile::{reconcile, Reconciliation};
pub use rules::*;
pub use time::{TimeFallback, TimeParseError};
