use clap::{Args, Subcommand};

mod set;

#[derive(Debug, Args)]
pub(crate) struct ScheduleCommand {
    #[command(subcommand)]
    command: ScheduleSubcommand,
}

#[derive(Debug, Subcommand)]
enum ScheduleSubcommand {
    Set(set::SetScheduleArgs),
}

pub(crate) async fn run(command: ScheduleCommand) -> Result<(), String> {
    match command.command {
        ScheduleSubcommand::Set(args) => set::run(args).await,
    }
}
