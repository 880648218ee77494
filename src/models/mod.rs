pub mod chat;
pub mod schedule;
pub mod weather;
