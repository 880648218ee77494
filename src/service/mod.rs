pub mod app_state;
pub mod chat_log;
pub mod generation_service;
pub mod geolocation;
pub mod orchestrator;
pub mod prompt_builder;
pub mod response_parser;
pub mod schedule_store;
pub mod weather_service;
