mod booking;
mod order;
mod schedule;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fieldbook-cli")]
#[command(about = "Field-survey booking operator tools")]
struct Cli {
    /// Reference timezone for cutoff and lead-time rules
    #[arg(
        long,
        global = true,
        env = "FIELDBOOK_REFERENCE_TZ",
        default_value = "America/Los_Angeles"
    )]
    tz: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check whether a date can be booked right now
    CheckDate {
        /// Date to check (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Service region (e.g. bay_area, phoenix_metro)
        #[arg(long, default_value = "other")]
        region: String,
    },
    /// Show a region's service windows, crew days and earliest bookable date
    Windows {
        #[arg(long)]
        region: String,
    },
    /// Geocode an address and print every match, first one marked
    Geocode {
        #[arg(long)]
        address: String,
    },
    /// Query bookable slots for an order
    Slots {
        #[arg(long)]
        order_no: String,
        /// Single-line address, e.g. "14th St, Vallejo, CA 94590, USA"
        #[arg(long)]
        address: String,
        /// Desired date (repeatable)
        #[arg(long = "date", required = true)]
        dates: Vec<NaiveDate>,
        /// Region; inferred from the address when omitted
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        customer_name: Option<String>,
    },
    /// Reserve a slot returned by `slots`
    Reserve {
        #[arg(long)]
        reservation_id: String,
        /// Report success even if the provider refuses the reservation
        #[arg(long)]
        force_continue: bool,
    },
    /// Inspect or remove provider orders
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
}

#[derive(Debug, Subcommand)]
enum OrderCommands {
    /// Print an order as the provider stores it
    Show {
        #[arg(long)]
        order_no: String,
    },
    /// Delete an order (e.g. a leftover temporary order)
    Delete {
        #[arg(long)]
        order_no: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("fieldbook-cli ready; run with --help for commands");
        return Ok(());
    };

    match command {
        Commands::CheckDate { date, region } => schedule::run_check_date(&cli.tz, date, &region),
        Commands::Windows { region } => schedule::run_windows(&cli.tz, &region),
        Commands::Geocode { address } => booking::run_geocode(&address).await,
        Commands::Slots {
            order_no,
            address,
            dates,
            region,
            customer_name,
        } => {
            booking::run_slots(booking::SlotArgs {
                order_no,
                address,
                dates,
                region,
                customer_name,
            })
            .await
        }
        Commands::Reserve {
            reservation_id,
            force_continue,
        } => booking::run_reserve(&reservation_id, force_continue).await,
        Commands::Order { command } => match command {
            OrderCommands::Show { order_no } => order::run_order_show(&order_no).await,
            OrderCommands::Delete { order_no } => order::run_order_delete(&order_no).await,
        },
    }
}

#[cfg(test)]
mod tests;
