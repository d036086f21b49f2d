//! App Router

use salvo::Router;

use crate::{bookings, callers, customers, discounts, healthcheck, observability, slots};

/// Every route the API serves, without state or documentation.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::with_path("barbers/{barber}/slots").get(slots::handlers::index::handler),
        )
        .push(
            Router::with_path("discounts/recommendations")
                .hoop(customers::middleware::optional)
                .get(discounts::handlers::recommendations::handler),
        )
        .push(
            Router::with_path("bookings/{booking}")
                .push(
                    Router::with_path("status")
                        .hoop(callers::middleware::staff)
                        .post(bookings::handlers::status::handler),
                )
                .push(
                    Router::with_path("payment-outcome")
                        .hoop(callers::middleware::payment_gateway)
                        .post(bookings::handlers::payment_outcome::handler),
                ),
        )
        .push(
            Router::new()
                .hoop(customers::middleware::handler)
                .push(
                    Router::with_path("discounts/validate")
                        .post(discounts::handlers::validate::handler),
                )
                .push(
                    Router::with_path("bookings")
                        .post(bookings::handlers::create::handler)
                        .push(
                            Router::with_path("{booking}")
                                .get(bookings::handlers::get::handler)
                                .push(
                                    Router::with_path("cancel")
                                        .post(bookings::handlers::cancel::handler),
                                ),
                        ),
                ),
        )
}
