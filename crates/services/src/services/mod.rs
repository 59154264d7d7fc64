pub mod config;
pub mod deletion_policy;
pub mod project;
pub mod report;
pub mod task;
