//! Pure GTD domain logic shared by the persistence and HTTP layers.
//!
//! Everything in this crate is synchronous and side-effect free: view
//! classification, filter specifications, due-date windowing, project
//! progress, and weekly-review staleness. Anything that needs "now"
//! takes it as an explicit parameter so callers control the clock.

pub mod classify;
pub mod error;
pub mod progress;
pub mod review;
pub mod time;
pub mod types;
