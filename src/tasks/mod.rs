pub mod location_task;
pub mod task_runner;
