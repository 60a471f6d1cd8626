//! Entity structs for the task engine.
//!
//! `Task` maps to the `tasks` table. Conversions from SQL rows live in `pte-db`.

mod task;

pub use task::{
    DATE_FORMAT, DEFAULT_ENERGY_REQUIRED, DEFAULT_IMPACT_SCORE, DEFAULT_STORY_POINTS, NewTask,
    Task, TaskFilter, generate_title, parse_date,
};
