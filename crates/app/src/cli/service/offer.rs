use chairside_app::domain::{
    catalog::{CatalogService, PgCatalogService, data::BarberPrice, records::ServiceUuid},
    identities::BarberUuid,
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct OfferServiceArgs {
    #[arg(long)]
    barber_uuid: Uuid,

    #[arg(long)]
    service_uuid: Uuid,

    /// Barber's own price in minor units; the catalogue price applies when omitted
    #[arg(long)]
    price: Option<u64>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: OfferServiceArgs) -> Result<(), String> {
    let db = super::super::connect(&args.database_url).await?;

    let offer = PgCatalogService::new(db)
        .set_barber_price(BarberPrice {
            barber: BarberUuid::from_uuid(args.barber_uuid),
            service: ServiceUuid::from_uuid(args.service_uuid),
            custom_price: args.price,
        })
        .await
        .map_err(|error| format!("failed to set barber price: {error}"))?;

    println!("barber_uuid: {}", offer.barber);
    println!("service_uuid: {}", offer.service);

    Ok(())
}
