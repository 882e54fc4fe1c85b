//! Per-request context, passed explicitly into the operations that need it.

use hireboard_membership::InviteToken;

/// The pieces of the inbound request needed to build the redemption link.
///
/// Immutable; injected by middleware so handlers never read ambient request
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    host: String,
}

impl RequestContext {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// `http` is allowed only for local-development hosts; anything else
    /// gets `https` regardless of how the request arrived.
    pub fn scheme(&self) -> &'static str {
        if self.is_local_dev() {
            "http"
        } else {
            "https"
        }
    }

    /// Absolute URL the invitee follows to redeem `token`.
    pub fn redemption_url(&self, token: &InviteToken) -> String {
        format!("{}://{}/invite/{}/accept", self.scheme(), self.host, token)
    }

    fn is_local_dev(&self) -> bool {
        let bare = self
            .host
            .rsplit_once(':')
            .map(|(h, _)| h)
            .unwrap_or(&self.host);
        matches!(bare, "localhost" | "127.0.0.1" | "[::1]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_hosts_get_http() {
        for host in ["localhost", "localhost:3000", "127.0.0.1:8080", "[::1]:8080"] {
            assert_eq!(RequestContext::new(host).scheme(), "http", "{host}");
        }
    }

    #[test]
    fn everything_else_gets_https() {
        for host in ["jobs.example.com", "jobs.example.com:443", "10.0.0.5:8080"] {
            assert_eq!(RequestContext::new(host).scheme(), "https", "{host}");
        }
    }

    #[test]
    fn redemption_url_embeds_the_token() {
        let ctx = RequestContext::new("jobs.example.com");
        let token = InviteToken::from_raw("tok123");
        assert_eq!(
            ctx.redemption_url(&token),
            "https://jobs.example.com/invite/tok123/accept"
        );
    }
}
