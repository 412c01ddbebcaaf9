//! Mapping between raw posted payloads and the typed submission.
//!
//! The reserved key names come from [`FormSettings`](crate::config::FormSettings).

/// Transport errors
mod error;
/// Field binding and submission reading
mod post;
/// Locale switch payloads
mod switch;

pub use error::TransportError;
pub use post::{
    FieldBinding,
    read_submission,
};
pub use switch::{
    SwitchRequest,
    SwitchResponse,
};
