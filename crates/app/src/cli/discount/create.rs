use chairside::discounts::{DiscountKind, DiscountScope};
use chairside_app::{
    clock::ShopClock,
    domain::discounts::{
        DiscountsService, PgDiscountsService, data::NewDiscount, records::DiscountUuid,
    },
};
use clap::{Args, ValueEnum};
use jiff::Timestamp;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Percentage,
    Fixed,
}

#[derive(Debug, Args)]
pub(crate) struct CreateDiscountArgs {
    /// Code customers enter; matched case-insensitively
    #[arg(long)]
    code: String,

    #[arg(long)]
    name: String,

    #[arg(long, value_enum)]
    kind: Kind,

    /// Percent off for percentage discounts, amount in minor units for fixed ones
    #[arg(long)]
    value: u64,

    /// Largest amount a percentage discount may take off
    #[arg(long)]
    max_discount: Option<u64>,

    #[arg(long, default_value_t = 0)]
    min_order_amount: u64,

    #[arg(long)]
    valid_from: Option<Timestamp>,

    #[arg(long)]
    valid_until: Option<Timestamp>,

    #[arg(long)]
    max_uses: Option<u32>,

    #[arg(long)]
    max_uses_per_customer: Option<u32>,

    /// Limit the discount to these barbers
    #[arg(long = "barber", conflicts_with = "services")]
    barbers: Vec<Uuid>,

    /// Limit the discount to these services
    #[arg(long = "service")]
    services: Vec<Uuid>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateDiscountArgs) -> Result<(), String> {
    let kind = match args.kind {
        Kind::Percentage => DiscountKind::Percentage {
            percent: u8::try_from(args.value)
                .map_err(|_error| format!("percentage {} is out of range", args.value))?,
            cap: args.max_discount,
        },
        Kind::Fixed => DiscountKind::Fixed { amount: args.value },
    };

    let scope = if !args.barbers.is_empty() {
        DiscountScope::Barbers(args.barbers.into_iter().collect())
    } else if !args.services.is_empty() {
        DiscountScope::Services(args.services.into_iter().collect())
    } else {
        DiscountScope::All
    };

    let db = super::super::connect(&args.database_url).await?;

    let discount = PgDiscountsService::new(db, ShopClock::utc())
        .create_discount(NewDiscount {
            uuid: DiscountUuid::new(),
            code: args.code,
            name: args.name,
            kind,
            min_order_amount: args.min_order_amount,
            valid_from: args.valid_from,
            valid_until: args.valid_until,
            max_uses: args.max_uses,
            max_uses_per_customer: args.max_uses_per_customer,
            is_active: true,
            scope,
        })
        .await
        .map_err(|error| format!("failed to create discount: {error}"))?;

    println!("discount_uuid: {}", discount.uuid);
    println!("discount_code: {}", discount.code);

    Ok(())
}
