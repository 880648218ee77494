pub mod gemini_client;
pub mod geolocation_client;
