//! Ports layer for the permission engine.
//!
//! - Inbound (Driving) port: engine API exposed to domain-layer callers
//! - Outbound (Driven) port: clock

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
