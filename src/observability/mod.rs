//! Observability
//!
//! Logging goes through `tracing` with structured fields; the `event` field
//! names an [`Event`]. The crate never installs a subscriber, applications
//! choose their own.
//!
//! Levels:
//! - `info`: definition directories loaded
//! - `debug`: definitions registered, construction begin/complete/rejected
//! - `trace`: individual casts

mod events;

pub use events::Event;
