//! Demo driver for the trip agent.
//!
//! Runs a canned SMS conversation against the scripted collaborators and a
//! few monitor ticks, printing every outbound message. The real inbound SMS
//! transport sits outside this crate.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use trip_agent::adapters::geo::StaticLocationResolver;
use trip_agent::adapters::notify::ConsoleNotifier;
use trip_agent::adapters::reasoning::ScriptedReasoning;
use trip_agent::adapters::search::DemoOfferSearch;
use trip_agent::adapters::status::FixedStatusCheck;
use trip_agent::application::TripAgent;
use trip_agent::config::AppConfig;
use trip_agent::domain::trip::FlightStatus;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load configuration: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("invalid configuration: {err}");
        std::process::exit(1);
    }

    // Scripted extraction replies for the demo conversation below.
    let reasoning = ScriptedReasoning::new().with_reply(
        r#"{"originName": "NYC", "destinationName": "LA",
            "departDate": "2026-03-01", "returnDate": "2026-03-10", "travelers": 2}"#,
    );
    let search = DemoOfferSearch::new();
    let search_handle = search.clone();
    let status = FixedStatusCheck::new();
    let status_handle = status.clone();

    let agent = TripAgent::new(
        config.agent.clone(),
        Arc::new(reasoning),
        Arc::new(StaticLocationResolver::default()),
        Arc::new(search),
        Arc::new(status),
        Arc::new(ConsoleNotifier::new()),
    );
    agent.start_monitor();

    let user = "+1234567890";
    for message in ["Hi", "I want to go from NYC to LA, March 1 to March 10, 2 of us"] {
        println!("[sms <- {}] {}", user, message);
        agent.handle_message(user, message).await;
    }

    // A price drop and a delay, observed by manual ticks so the demo does
    // not wait out the monitor interval.
    search_handle.set_flight_price(249.0);
    agent.run_monitor_tick().await;
    status_handle.set(FlightStatus::Delayed);
    agent.run_monitor_tick().await;

    agent.stop_monitor();
}
