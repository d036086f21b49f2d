//! Customer identity middleware.

use salvo::prelude::*;
use uuid::Uuid;

use chairside_app::domain::identities::CustomerUuid;

use crate::extensions::*;

pub(crate) const CUSTOMER_UUID_HEADER: &str = "x-customer-uuid";

/// Requires a customer identity and stores it in the depot.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match CustomerHeader::of(req) {
        CustomerHeader::Valid(customer) => {
            depot.insert_customer_uuid(customer);

            ctrl.call_next(req, depot, res).await;
        }
        CustomerHeader::Invalid => {
            res.render(StatusError::unauthorized().brief("Invalid X-Customer-Uuid header"));
            ctrl.skip_rest();
        }
        CustomerHeader::Missing => {
            res.render(StatusError::unauthorized().brief("Missing X-Customer-Uuid header"));
            ctrl.skip_rest();
        }
    }
}

/// Stores a customer identity in the depot when one is given.
///
/// Anonymous requests pass through; a malformed header is still rejected.
#[salvo::handler]
pub(crate) async fn optional(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match CustomerHeader::of(req) {
        CustomerHeader::Valid(customer) => depot.insert_customer_uuid(customer),
        CustomerHeader::Invalid => {
            res.render(StatusError::unauthorized().brief("Invalid X-Customer-Uuid header"));
            ctrl.skip_rest();

            return;
        }
        CustomerHeader::Missing => {}
    }

    ctrl.call_next(req, depot, res).await;
}

enum CustomerHeader {
    Missing,
    Invalid,
    Valid(CustomerUuid),
}

impl CustomerHeader {
    fn of(req: &Request) -> Self {
        let Some(value) = req.headers().get(CUSTOMER_UUID_HEADER) else {
            return Self::Missing;
        };

        value
            .to_str()
            .ok()
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .map_or(Self::Invalid, |uuid| Self::Valid(CustomerUuid::from_uuid(uuid)))
    }
}
