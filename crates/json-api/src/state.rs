//! State

use std::sync::Arc;

use chairside_app::context::AppContext;

use crate::callers::CallerTokens;

/// Services shared by every handler.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) callers: CallerTokens,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, callers: CallerTokens) -> Arc<Self> {
        Arc::new(Self { app, callers })
    }
}
