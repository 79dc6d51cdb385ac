//! Background Tasks Module
//!
//! Contains background tasks that can run alongside a shared cache.
//!
//! # Tasks
//! - Expiration cleanup: purges expired entries at a configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
