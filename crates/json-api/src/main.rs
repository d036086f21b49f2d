//! Chairside JSON API Server

use std::{process, sync::Arc};

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info, warn};

use chairside_app::{
    context::AppContext,
    payments::{DisabledPaymentGateway, HttpPaymentGateway, PaymentGateway},
};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod bookings;
mod callers;
mod config;
mod customers;
mod discounts;
mod extensions;
mod healthcheck;
mod observability;
mod router;
mod shutdown;
mod slots;
mod state;
#[cfg(test)]
mod test_helpers;

/// Chairside JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {init_error}");
        }

        process::exit(1);
    }

    let settings = match config.shop.settings() {
        Ok(settings) => settings,
        Err(zone_error) => {
            error!(
                zone = %config.shop.shop_timezone,
                "unknown shop time zone: {zone_error}"
            );

            process::exit(1);
        }
    };

    let payments: Arc<dyn PaymentGateway> = match config.payments.gateway() {
        Some(gateway) => match HttpPaymentGateway::new(gateway) {
            Ok(gateway) => Arc::new(gateway),
            Err(gateway_error) => {
                error!("failed to initialize payment gateway: {gateway_error}");

                process::exit(1);
            }
        },
        None => {
            warn!("PAYMENT_GATEWAY_URL is not set, bookings will not receive payment references");

            Arc::new(DisabledPaymentGateway)
        }
    };

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        settings,
        payments,
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let callers = config.caller_tokens();

    if callers.staff.is_none() {
        warn!("STAFF_API_TOKEN is not set, booking status changes will be refused");
    }

    if callers.payment_gateway.is_none() {
        warn!("PAYMENT_GATEWAY_TOKEN is not set, payment outcome callbacks will be refused");
    }

    let addr = config.socket_addr();

    info!(
        zone = %config.shop.shop_timezone,
        slot_granularity_minutes = config.shop.slot_granularity_minutes,
        "Starting server on {addr}"
    );

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::new(app, callers)))
        .push(router::app_router());

    let doc = OpenApi::new("Chairside API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;
}
