use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use tracing::error;

use crate::handlers::terminal::{render_day, render_message, render_schedule, render_weather};
use crate::models::schedule::Day;
use crate::service::geolocation::LocationProvider;
use crate::service::orchestrator::{ChatOutcome, Planner, SendRejection};
use crate::tasks::location_task::run_location_task;

#[derive(Parser)]
#[command(name = "dayPlanner", about = "AI-generated daily plans you can revise by chatting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the generated plan for one day
    Show {
        #[arg(long, default_value = "today")]
        day: Day,
    },
    /// Generate both days, then revise them in a chat session
    Chat {},
    /// Print the forecast for the resolved location
    Weather {},
}

pub async fn cli(
    planner: Planner,
    location: Option<Arc<dyn LocationProvider>>,
    geolocation_timeout: Duration,
) {
    // Fine to exit here on bad arguments
    let cli = Cli::parse();
    match cli.command {
        Commands::Show { day } => {
            let _ = tokio::join!(
                planner.initial_load(),
                run_location_task(planner.clone(), location, geolocation_timeout)
            );
            planner.set_active_tab(day).await;
            println!("{}", render_day(&planner.snapshot().await, day));
        }
        Commands::Chat {} => {
            tokio::spawn(run_location_task(
                planner.clone(),
                location,
                geolocation_timeout,
            ));
            chat_session(&planner).await;
        }
        Commands::Weather {} => {
            run_location_task(planner.clone(), location, geolocation_timeout).await;
            print_weather(&planner).await;
        }
    }
}

async fn print_weather(planner: &Planner) {
    let state = planner.state();
    let state = state.lock().await;
    if let Some(advisory) = state.visible_advisory() {
        println!("! {}", advisory);
    }
    match &state.weather {
        Some(report) => {
            for day in Day::ALL {
                println!("{}: {}", day.label(), render_weather(report.for_day(day)));
            }
        }
        None => println!("Weather is unavailable right now."),
    }
}

/// Esc and Ctrl-C end the session without an error.
fn is_user_exit(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

async fn read_line() -> Option<String> {
    let answer = tokio::task::spawn_blocking(|| {
        Text::new("You:")
            .with_help_message("/today, /tomorrow or /quit")
            .prompt()
    })
    .await;
    match answer {
        Ok(Ok(line)) => Some(line),
        Ok(Err(err)) if is_user_exit(&err) => None,
        Ok(Err(err)) => {
            error!(error = %err, "failed to read chat input");
            None
        }
        Err(err) => {
            error!(error = %err, "chat input task panicked");
            None
        }
    }
}

async fn chat_session(planner: &Planner) {
    if planner.initial_load().await.is_err() {
        println!("{}", render_day(&planner.snapshot().await, Day::Today));
        return;
    }
    planner.set_chat_open(true).await;

    let snapshot = planner.snapshot().await;
    println!("{}\n", render_day(&snapshot, snapshot.active_tab));
    for message in &snapshot.chat {
        println!("{}", render_message(message));
    }

    while let Some(line) = read_line().await {
        match line.trim() {
            "/quit" => break,
            "/today" | "/tomorrow" => {
                let day = if line.trim() == "/today" {
                    Day::Today
                } else {
                    Day::Tomorrow
                };
                planner.set_active_tab(day).await;
                println!("{}", render_day(&planner.snapshot().await, day));
            }
            _ => match planner.send_message(&line).await {
                ChatOutcome::Replied { day, message } => {
                    println!("assistant> {}\n", message);
                    let state = planner.state();
                    let state = state.lock().await;
                    if let Some(store) = state.schedules() {
                        println!("{}", render_schedule(store.get(day)));
                    }
                }
                ChatOutcome::Failed(_) => {
                    let snapshot = planner.snapshot().await;
                    if let Some(banner) = snapshot.banner {
                        println!("! {}", banner);
                    }
                }
                ChatOutcome::Rejected(SendRejection::Blank) => {}
                ChatOutcome::Rejected(rejection) => {
                    println!("! Cannot send right now ({:?})", rejection);
                }
            },
        }
    }
    planner.set_chat_open(false).await;
}
