//! SweetExperiences Engine
//!
//! A long-running background agent that tracks progress toward a fixed
//! catalog of achievements, persists that state to a line-oriented data
//! file, and pushes unlock/ambient/system notifications to an external
//! consumer over a local Unix socket.
//!
//! ## Architecture
//!
//! Four background workers (achievement evaluation, notification dispatch,
//! and two activity listeners) share one [`engine::EngineState`] behind a
//! single coarse data lock. A control loop in the binary watches the config
//! file and the shutdown signal, and joins all workers before the final
//! persistence flush.

pub mod config;
pub mod domain;
pub mod engine;
pub mod notify;
pub mod store;
pub mod watcher;

pub use domain::*;
