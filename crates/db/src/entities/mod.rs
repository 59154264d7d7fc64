pub mod comment;
pub mod project;
pub mod task;
pub mod task_history;
pub mod user;
