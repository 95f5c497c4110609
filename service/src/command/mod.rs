//! [`Command`] definition.

pub mod activate_line;
pub mod advance_month;
pub mod cancel_line;
pub mod rate_call;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    activate_line::ActivateLine, advance_month::AdvanceMonth,
    cancel_line::CancelLine, rate_call::RateCall,
};
