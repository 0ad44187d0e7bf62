//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Sweep: Removes expired entries from every cache instance at a fixed interval

mod cleanup;

pub use cleanup::{spawn_sweep_task, SweepTask};
