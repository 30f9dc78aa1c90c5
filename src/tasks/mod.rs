//! Tasks Module
//!
//! Background maintenance tasks for the cache service.

mod cleanup;

pub use cleanup::spawn_sweep_task;
