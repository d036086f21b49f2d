use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct DiscountCommand {
    #[command(subcommand)]
    command: DiscountSubcommand,
}

#[derive(Debug, Subcommand)]
enum DiscountSubcommand {
    Create(create::CreateDiscountArgs),
}

pub(crate) async fn run(command: DiscountCommand) -> Result<(), String> {
    match command.command {
        DiscountSubcommand::Create(args) => create::run(args).await,
    }
}
