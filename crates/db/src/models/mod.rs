#![allow(clippy::useless_conversion)]

pub mod comment;
pub mod ids;
pub mod project;
pub mod report;
pub mod task;
pub mod task_history;
pub mod user;
