//! Core data types shared by the loader, interval computer and reporter

pub mod event;
pub mod interval;

pub use event::EventRecord;
pub use interval::{IntervalRecord, Transition, UNKNOWN_CATEGORY};
