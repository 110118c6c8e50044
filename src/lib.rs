//! Course planning: derives term-organised weekly timetables, time conflicts,
//! and month-range duration bars from free-text course scheduling data.

pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod schedule;
pub mod web;
pub mod working_set;

pub use error::{PlannerError, Result};
