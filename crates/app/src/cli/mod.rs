use chairside_app::database::{self, Db};
use clap::{Parser, Subcommand};

mod db;
mod discount;
mod schedule;
mod service;

#[derive(Debug, Parser)]
#[command(name = "chairside-app", about = "Chairside admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Service(service::ServiceCommand),
    Schedule(schedule::ScheduleCommand),
    Discount(discount::DiscountCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Service(command) => service::run(command).await,
            Commands::Schedule(command) => schedule::run(command).await,
            Commands::Discount(command) => discount::run(command).await,
        }
    }
}

async fn connect(database_url: &str) -> Result<Db, String> {
    database::connect(database_url)
        .await
        .map(Db::new)
        .map_err(|error| format!("failed to connect to database: {error}"))
}
