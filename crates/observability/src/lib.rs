//! # schnick-observability
//!
//! Observability-Crate fuer Schnick:
//! - Structured Logging (Text oder JSON) via tracing-subscriber
//! - Level gilt fuer die eigenen Crates, fremde Crates bleiben auf `warn`

pub mod logging;

pub use logging::{filter_direktive, log_level_gueltig, logging_initialisieren, LogFormat};
