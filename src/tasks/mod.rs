//! Background Tasks Module
//!
//! Optional housekeeping that runs alongside a cache. Nothing here is
//! started implicitly; callers spawn tasks explicitly.
//!
//! # Tasks
//! - Expiry sweep: reclaims expired entries that are never read again

mod sweeper;

pub use sweeper::spawn_sweep_task;
