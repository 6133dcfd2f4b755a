//! User event logging to the backend GraphQL API.
//!
//! Events are fire-and-forget: they are never sent to the public instance, and
//! transport or API failures are swallowed so end users never see them.
//!
//! * [`GraphQlClient`]: transport seam, implemented by the embedding application
//! * [`EventLogger`]: builds the `logEvent` / `logUserEvent` mutations
//! * [`TelemetryConfig`]: which instance URL counts as public

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod logger;

pub use client::{GraphQlClient, GraphQlRequest};
pub use config::TelemetryConfig;
pub use error::{Result, TelemetryError};
pub use event::{Event, EventSource, UserEvent};
pub use logger::{EventLogger, LogOutcome};
