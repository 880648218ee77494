use crate::error::PlannerResult;
use crate::models::weather::{Coordinates, WeatherReport};
use crate::service::generation_service::{GenerationClient, GenerationRequest};
use crate::service::prompt_builder;
use crate::service::response_parser;

pub struct WeatherService;

impl WeatherService {
    pub async fn fetch(
        generator: &dyn GenerationClient,
        model: &str,
        location: Coordinates,
    ) -> PlannerResult<WeatherReport> {
        let request = GenerationRequest::grounded(model, prompt_builder::weather_prompt(location));
        let raw = generator.generate(request).await?;
        response_parser::parse_weather(&raw)
    }
}
