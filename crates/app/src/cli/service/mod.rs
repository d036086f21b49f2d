use clap::{Args, Subcommand};

mod create;
mod offer;

#[derive(Debug, Args)]
pub(crate) struct ServiceCommand {
    #[command(subcommand)]
    command: ServiceSubcommand,
}

#[derive(Debug, Subcommand)]
enum ServiceSubcommand {
    Create(create::CreateServiceArgs),
    Offer(offer::OfferServiceArgs),
}

pub(crate) async fn run(command: ServiceCommand) -> Result<(), String> {
    match command.command {
        ServiceSubcommand::Create(args) => create::run(args).await,
        ServiceSubcommand::Offer(args) => offer::run(args).await,
    }
}
