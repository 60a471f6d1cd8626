//! # pte-core
//!
//! Core types shared by every crate of the personal task engine:
//! - The `Task` record and the `NewTask` creation input
//! - Priority/status/scope enums with their text forms
//! - The execution-score function used to rank tasks
//! - Pure dashboard and weekly-report builders
//! - A `Clock` port so time-dependent code stays testable
//! - Cross-cutting error types

pub mod clock;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod scoring;
pub mod summary;
