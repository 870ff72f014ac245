//! Access decisions for pages marked `auth`.

use crate::request::RequestContext;

/// Decides whether a request is authenticated.
pub trait AuthEvaluator: Send + Sync {
    fn is_authenticated(&self, ctx: &RequestContext) -> bool;
}

/// Trusts claims that were verified upstream (for example a decoded token).
///
/// A request is authenticated when its claims carry the configured claim with
/// the value `true`. Requests without claims are anonymous.
#[derive(Debug, Clone)]
pub struct ClaimsAuthEvaluator {
    claim: String,
}

impl ClaimsAuthEvaluator {
    pub const DEFAULT_CLAIM: &'static str = "authenticated";

    pub fn new(claim: impl Into<String>) -> Self {
        Self {
            claim: claim.into(),
        }
    }
}

impl Default for ClaimsAuthEvaluator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CLAIM)
    }
}

impl AuthEvaluator for ClaimsAuthEvaluator {
    fn is_authenticated(&self, ctx: &RequestContext) -> bool {
        ctx.claim(&self.claim).is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}
