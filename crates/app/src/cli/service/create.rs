use chairside_app::domain::catalog::{
    CatalogService, PgCatalogService, data::NewService, records::ServiceUuid,
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateServiceArgs {
    /// Service name shown to customers
    #[arg(long)]
    name: String,

    /// Appointment length in minutes
    #[arg(long)]
    duration_minutes: u32,

    /// Catalogue price in minor units
    #[arg(long)]
    base_price: u64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional service UUID; generated when omitted
    #[arg(long)]
    service_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateServiceArgs) -> Result<(), String> {
    if args.name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }

    let db = super::super::connect(&args.database_url).await?;

    let service = PgCatalogService::new(db)
        .create_service(NewService {
            uuid: args
                .service_uuid
                .map_or_else(ServiceUuid::new, ServiceUuid::from_uuid),
            name: args.name,
            duration_minutes: args.duration_minutes,
            base_price: args.base_price,
        })
        .await
        .map_err(|error| format!("failed to create service: {error}"))?;

    println!("service_uuid: {}", service.uuid);
    println!("service_name: {}", service.name);

    Ok(())
}
