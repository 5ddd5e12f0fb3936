use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use dotenv::dotenv;
use serde::Serialize;
use tracing::info;

use healthsync::api::BookingRepository;
use healthsync::config;
use healthsync::http::ApiClient;
use healthsync::models::{BookingQuery, Specialization};
use healthsync::telemetry::init_telemetry;
use healthsync::workflows::{filter_doctors, load_doctors, BookingFlow};

#[derive(Parser, Debug)]
#[command(name = "healthsync", about = "Query the HealthSync appointment backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List doctors, optionally filtered by name and specialization
    Doctors {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        specialization: Option<Specialization>,
    },
    /// Free half-hour start times for a doctor on a date
    Slots {
        #[arg(long)]
        doctor: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
    },
    /// Bookings of one doctor or one patient
    #[command(group(ArgGroup::new("owner").required(true).args(["doctor", "patient"])))]
    Bookings {
        #[arg(long)]
        doctor: Option<String>,
        #[arg(long)]
        patient: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let config = config::init().context("Failed to load configuration")?;
    let telemetry = init_telemetry(None).await?;
    info!(
        "{} ({:?}) using backend {}",
        config.app.name, config.app.environment, config.api.base_url
    );

    let api = ApiClient::new(&config.api).context("Failed to build HTTP client")?;

    match cli.command {
        Command::Doctors {
            search,
            specialization,
        } => {
            let doctors = load_doctors(&api).await?;
            let specialization = specialization.map(|s| s.as_str());
            print_json(&filter_doctors(&doctors, &search, specialization))?;
        }
        Command::Slots { doctor, date } => {
            let options = BookingFlow::new(&api).load_options(&doctor, &date).await?;
            print_json(&options)?;
        }
        Command::Bookings { doctor, patient } => {
            let query = match (doctor, patient) {
                (Some(doctor), _) => BookingQuery::for_doctor(&doctor),
                (None, Some(patient)) => BookingQuery::for_patient(&patient),
                (None, None) => anyhow::bail!("--doctor or --patient is required"),
            };
            print_json(&BookingRepository::list(&api, &query).await?)?;
        }
    }

    telemetry.shutdown().await?;
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
