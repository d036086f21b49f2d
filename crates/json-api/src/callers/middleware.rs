//! Caller credential middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use crate::{callers::CallerTokens, state::State};

/// Requires the staff bearer secret.
#[salvo::handler]
pub(crate) async fn staff(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let verdict = match depot.obtain::<Arc<State>>() {
        Ok(state) => check(req, caller_token(&state.callers, Caller::Staff)),
        Err(_error) => Err(StatusError::internal_server_error()),
    };

    proceed(verdict, req, depot, res, ctrl).await;
}

/// Requires the payment gateway's bearer secret.
#[salvo::handler]
pub(crate) async fn payment_gateway(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let verdict = match depot.obtain::<Arc<State>>() {
        Ok(state) => check(req, caller_token(&state.callers, Caller::PaymentGateway)),
        Err(_error) => Err(StatusError::internal_server_error()),
    };

    proceed(verdict, req, depot, res, ctrl).await;
}

#[derive(Debug, Clone, Copy)]
enum Caller {
    Staff,
    PaymentGateway,
}

fn caller_token(tokens: &CallerTokens, caller: Caller) -> Option<&str> {
    match caller {
        Caller::Staff => tokens.staff.as_deref(),
        Caller::PaymentGateway => tokens.payment_gateway.as_deref(),
    }
}

async fn proceed(
    verdict: Result<(), StatusError>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match verdict {
        Ok(()) => {
            ctrl.call_next(req, depot, res).await;
        }
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();
        }
    }
}

fn check(req: &Request, expected: Option<&str>) -> Result<(), StatusError> {
    let Some(expected) = expected else {
        return Err(StatusError::unauthorized().brief("Caller credentials are not configured"));
    };

    let token = extract_bearer_token(req).ok_or_else(|| {
        StatusError::unauthorized().brief("Missing or invalid Authorization header")
    })?;

    if tokens_match(token.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(StatusError::unauthorized().brief("Invalid caller token"))
    }
}

/// Compares every byte so the time taken does not depend on where the tokens differ.
fn tokens_match(given: &[u8], expected: &[u8]) -> bool {
    given.len() == expected.len()
        && given
            .iter()
            .zip(expected)
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, test::TestClient};
    use testresult::TestResult;

    use chairside_app::{
        context::AppContext,
        domain::{
            bookings::MockBookingsService, catalog::MockCatalogService,
            discounts::MockDiscountsService, schedules::MockSchedulesService,
            slots::MockSlotsService,
        },
    };

    use super::*;

    #[salvo::handler]
    async fn ok(res: &mut Response) {
        res.render("ok");
    }

    fn service(tokens: CallerTokens) -> Service {
        let app = AppContext {
            schedules: Arc::new(MockSchedulesService::new()),
            catalog: Arc::new(MockCatalogService::new()),
            slots: Arc::new(MockSlotsService::new()),
            discounts: Arc::new(MockDiscountsService::new()),
            bookings: Arc::new(MockBookingsService::new()),
        };

        Service::new(
            Router::new()
                .hoop(inject(State::new(app, tokens)))
                .push(Router::with_path("staff").hoop(staff).post(ok))
                .push(Router::with_path("gateway").hoop(payment_gateway).post(ok)),
        )
    }

    #[tokio::test]
    async fn matching_secret_is_let_through() -> TestResult {
        let service = service(CallerTokens::new("staff-secret", "gateway-secret"));

        for (path, secret) in [("staff", "staff-secret"), ("gateway", "gateway-secret")] {
            let res = TestClient::post(format!("http://example.com/{path}"))
                .add_header(AUTHORIZATION, format!("Bearer {secret}"), true)
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::OK), "{path}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn missing_or_wrong_secret_returns_401() -> TestResult {
        let service = service(CallerTokens::new("staff-secret", "gateway-secret"));

        let missing = TestClient::post("http://example.com/gateway")
            .send(&service)
            .await;

        let swapped = TestClient::post("http://example.com/gateway")
            .add_header(AUTHORIZATION, "Bearer staff-secret", true)
            .send(&service)
            .await;

        assert_eq!(missing.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(swapped.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn unconfigured_secret_closes_the_route() -> TestResult {
        let service = service(CallerTokens::default());

        let res = TestClient::post("http://example.com/staff")
            .add_header(AUTHORIZATION, "Bearer ", true)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[test]
    fn tokens_of_different_length_never_match() {
        assert!(tokens_match(b"secret", b"secret"));
        assert!(!tokens_match(b"secret", b"secret!"));
        assert!(!tokens_match(b"secreT", b"secret"));
    }
}
