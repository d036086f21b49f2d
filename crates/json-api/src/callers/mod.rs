//! Callers
//!
//! Staff tools and the payment gateway call a few booking routes on behalf of the shop. Each
//! presents a shared bearer secret.

pub(crate) mod middleware;

/// Shared secrets accepted from non-customer callers. An unset secret closes its routes.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallerTokens {
    pub(crate) staff: Option<String>,
    pub(crate) payment_gateway: Option<String>,
}

impl CallerTokens {
    #[must_use]
    pub(crate) fn new(staff: &str, payment_gateway: &str) -> Self {
        Self {
            staff: non_blank(staff),
            payment_gateway: non_blank(payment_gateway),
        }
    }
}

fn non_blank(token: &str) -> Option<String> {
    let token = token.trim();

    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_secrets_are_unset() {
        let tokens = CallerTokens::new("  ", " gateway-secret ");

        assert_eq!(tokens.staff, None);
        assert_eq!(tokens.payment_gateway.as_deref(), Some("gateway-secret"));
    }
}
