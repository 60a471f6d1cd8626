//! Repository methods for the `tasks` table.
//!
//! Each module adds methods to `PteDb` via `impl PteDb` blocks.

pub mod task;
