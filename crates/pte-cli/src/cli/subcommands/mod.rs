mod bot;
mod db;
mod task;

pub use bot::BotCommands;
pub use db::DbCommands;
pub use task::{AddArgs, TaskCommands};
