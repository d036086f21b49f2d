use chairside::schedule::DayOfWeek;
use chairside_app::domain::{
    identities::BarberUuid,
    schedules::{
        PgSchedulesService, SchedulesService, data::NewScheduleDay, records::ScheduleDayUuid,
    },
};
use clap::Args;
use jiff::civil::Time;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct SetScheduleArgs {
    #[arg(long)]
    barber_uuid: Uuid,

    /// Day of week, 0 = Sunday through 6 = Saturday
    #[arg(long)]
    day: i16,

    /// Opening time, e.g. 09:00
    #[arg(long)]
    start: Time,

    /// Closing time, e.g. 18:00
    #[arg(long)]
    end: Time,

    /// Mark the day as not working
    #[arg(long)]
    closed: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SetScheduleArgs) -> Result<(), String> {
    let day = DayOfWeek::new(args.day).map_err(|error| error.to_string())?;
    let db = super::super::connect(&args.database_url).await?;

    let schedule = PgSchedulesService::new(db)
        .set_schedule_day(NewScheduleDay {
            uuid: ScheduleDayUuid::new(),
            barber: BarberUuid::from_uuid(args.barber_uuid),
            day,
            start_time: args.start,
            end_time: args.end,
            is_available: !args.closed,
        })
        .await
        .map_err(|error| format!("failed to set schedule: {error}"))?;

    println!("schedule_uuid: {}", schedule.uuid);
    println!(
        "hours: {} - {}",
        schedule.day.hours.start(),
        schedule.day.hours.end()
    );

    Ok(())
}
