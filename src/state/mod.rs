//! State module for tracking crawl progress
//!
//! A crawl run moves `Pending -> Running(1) -> ... -> Running(N) ->
//! Completed`, or stops at `Failed(i)` when a listing page cannot be
//! fetched. Page-level failure is fatal to the run; item-level failure never
//! reaches this state machine.

mod run_state;

pub use run_state::RunState;
