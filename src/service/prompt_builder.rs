use chrono::NaiveDate;
use serde_json::{Value, json};

use crate::models::schedule::{Day, DayKind, EventIcon, ScheduleEvent};
use crate::models::weather::Coordinates;

const WORKDAY_CONSTRAINTS: &str = "\
- Wake at 05:30. The user's wife watches the baby during early prep.\n\
- Morning run of about 40 minutes, then cooldown and shower.\n\
- Breakfast around 06:50; baby handoff and feeding is handled by the wife.\n\
- One hour of study per day (chess, concrete, steel, etc.), split between a 40 minute morning block and 20 minutes over lunch.\n\
- Commute to work 08:30 - 09:00 and back home 17:00 - 17:30.\n\
- Work 09:00 - 17:00: a deep work block in the morning, meetings and tasks after lunch, a short wrap-up to plan the next day.\n\
- Gym near home after work, roughly 17:45 - 19:00.\n\
- Family dinner with both parents around 19:30, then a shared baby routine (bath, feed, nap).\n\
- Short chill time for light prep, bedtime at 21:30 for 8 hours of sleep.";

const OFF_DAY_CONSTRAINTS: &str = "\
- This is the weekly off day: no work and no commute.\n\
- Relaxed wake around 06:30.\n\
- Morning family and baby bonding time with both parents.\n\
- A recovery block (nap or light mobility).\n\
- A flexible workout: a longer gym session or a family walk.\n\
- Open afternoon for errands, hobbies and naps.\n\
- Social or extended family dinner in the evening.\n\
- About 30 minutes of low-key study or preparation for the week.";

fn event_properties() -> Value {
    json!({
        "icon": {
            "type": "STRING",
            "description": format!("An icon name from the list: {}.", EventIcon::KNOWN_TAGS.join(", ")),
        },
        "time": {
            "type": "STRING",
            "description": "The time of the event, e.g., \"06:00 - 06:30\".",
        },
        "title": {
            "type": "STRING",
            "description": "A short, descriptive title for the event.",
        },
        "description": {
            "type": "STRING",
            "description": "A brief description of the event, including who is responsible for baby care if relevant.",
        },
    })
}

fn event_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": event_properties(),
        "required": ["icon", "time", "title", "description"],
    })
}

/// Response shape for an initial schedule: an array of events.
pub fn schedule_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": event_schema(),
    })
}

/// Response shape for a chat turn: a reply plus the full schedule.
pub fn chat_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "responseMessage": {
                "type": "STRING",
                "description": "The natural language response to the user. Answer their question, or confirm the schedule change.",
            },
            "updatedSchedule": {
                "type": "ARRAY",
                "items": event_schema(),
                "description": "The complete list of schedule events. If the user only asked a question, return the original schedule unchanged. If they asked for a change, return the modified schedule.",
            },
        },
        "required": ["responseMessage", "updatedSchedule"],
    })
}

pub fn schedule_prompt(day: Day, date: NaiveDate, kind: DayKind) -> String {
    let (kind_label, constraints) = match kind {
        DayKind::Workday => ("a workday", WORKDAY_CONSTRAINTS),
        DayKind::OffDay => ("an off day", OFF_DAY_CONSTRAINTS),
    };
    format!(
        "You are a personal daily planner.\n\
         Create a realistic, time-blocked schedule for {day} ({date}), which is {kind_label}.\n\
         Fixed life constraints:\n\
         {constraints}\n\
         Rules:\n\
         - Cover the whole day from waking up to bedtime, in chronological order.\n\
         - Use time ranges like \"06:00 - 06:30\".\n\
         - Every event's icon must be one of: {icons}.\n\
         - Keep titles short and descriptions to one sentence.\n\
         Return ONLY a JSON array of events, each with exactly the fields icon, time, title and description.",
        day = day,
        date = date.format("%A, %B %-d, %Y"),
        kind_label = kind_label,
        constraints = constraints,
        icons = EventIcon::KNOWN_TAGS.join(", "),
    )
}

pub fn chat_edit_prompt(
    day: Day,
    schedule: &[ScheduleEvent],
    message: &str,
) -> Result<String, serde_json::Error> {
    let current = serde_json::to_string_pretty(schedule)?;
    Ok(format!(
        "You are an intelligent daily assistant helping the user manage their day.\n\
         \n\
         Context:\n\
         - The user is viewing their schedule for: {day}.\n\
         - Current Schedule Data: {current}\n\
         \n\
         User's Message: \"{message}\"\n\
         \n\
         Task:\n\
         1. Interpret the User's Message.\n\
         2. If it is a QUESTION about the schedule (e.g., \"When is my first meeting?\", \"Do I have time for a nap?\", \"What's next?\"), answer the question in 'responseMessage' and return the Current Schedule Data EXACTLY as is in 'updatedSchedule'.\n\
         3. If it is a GENERAL CHAT (e.g., \"Hi\", \"Thanks\"), respond politely in 'responseMessage' and return the Current Schedule Data EXACTLY as is in 'updatedSchedule'.\n\
         4. If it is a REQUEST TO CHANGE the schedule (e.g., \"Move gym to 6pm\", \"I'm sick, cancel the run\"), modify the schedule data accordingly in 'updatedSchedule' and describe the change in 'responseMessage'.\n\
         \n\
         Output MUST be a JSON object containing 'responseMessage' and 'updatedSchedule'."
    ))
}

pub fn weather_prompt(location: Coordinates) -> String {
    format!(
        "What is the weather forecast for today and tomorrow at latitude {lat}, longitude {lng}?\n\
         Return a valid JSON object (do NOT use markdown code blocks, just raw JSON) with this exact structure:\n\
         {{\n\
           \"today\": {{ \"temp\": \"20°C\", \"condition\": \"Sunny\", \"location\": \"City Name\" }},\n\
           \"tomorrow\": {{ \"temp\": \"18°C\", \"condition\": \"Rain\", \"location\": \"City Name\" }}\n\
         }}",
        lat = location.lat,
        lng = location.lng,
    )
}
