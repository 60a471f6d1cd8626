pub mod bot;
pub mod db;
pub mod dispatch;
pub mod shared;
pub mod task;
