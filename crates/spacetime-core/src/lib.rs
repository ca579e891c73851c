//! Configuration and session orchestration for the Spacetime tracer.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `spacetime-config.yaml` into
//!   strongly-typed structs.
//! - [`session`] -- [`ViewerSession`], the single owner of the simulation
//!   and its recorded history, and the [`TraceReport`] it produces.
//!
//! [`ViewerSession`]: session::ViewerSession
//! [`TraceReport`]: session::TraceReport

pub mod config;
pub mod session;

pub use config::{ConfigError, SpacetimeConfig};
pub use session::{SessionError, TraceReport, ViewerSession};
