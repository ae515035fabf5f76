//! Best-effort outbound calls for caseintake
//!
//! Marketing-event forwarding and double-opt-in email triggering. Both
//! follow the same discipline as the sheet mirror: bounded timeouts, and the
//! caller treats every failure as a logged degradation, never a request
//! failure.

mod analytics;
mod error;
mod optin;

pub use analytics::{strip_properties, AnalyticsClient};
pub use error::OutboundError;
pub use optin::OptInClient;
