//! Cross-origin access policy.

use serde::{Deserialize, Serialize};

/// Static cross-origin policy, loaded once at startup and immutable after.
///
/// Origins are matched by exact string comparison. There is no wildcard or
/// subdomain matching; an origin either appears in the list or it does not.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsPolicy {
    /// Exact-match origin allow-list, in configuration order.
    pub allowed_origins: Vec<String>,

    /// Whether `Access-Control-Allow-Credentials: true` is emitted.
    pub allow_credentials: bool,

    /// HTTP verbs advertised in pre-flight responses.
    pub allowed_methods: Vec<String>,

    /// Header names advertised in pre-flight responses.
    pub allowed_headers: Vec<String>,
}

impl CorsPolicy {
    /// Whether the given origin is on the allow-list.
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }

    /// `Access-Control-Allow-Methods` header value.
    pub fn methods_header(&self) -> String {
        self.allowed_methods.join(", ")
    }

    /// `Access-Control-Allow-Headers` header value.
    pub fn headers_header(&self) -> String {
        self.allowed_headers.join(", ")
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "https://frontendv1-mu.vercel.app".to_string(),
                "https://backendv1-bbin.onrender.com".to_string(),
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
                "https://localhost:5173".to_string(),
            ],
            allow_credentials: true,
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .map(String::from)
                .to_vec(),
            allowed_headers: ["Content-Type", "Authorization", "Accept", "X-Requested-With"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let policy = CorsPolicy::default();
        assert!(policy.allows("http://localhost:5173"));
        assert!(!policy.allows("http://localhost:5174"));
        // No subdomain or scheme leniency.
        assert!(!policy.allows("https://sub.frontendv1-mu.vercel.app"));
        assert!(!policy.allows("http://frontendv1-mu.vercel.app"));
        assert!(!policy.allows(""));
    }

    #[test]
    fn header_values_join_configuration_order() {
        let policy = CorsPolicy::default();
        assert_eq!(policy.methods_header(), "GET, POST, PUT, DELETE, OPTIONS");
        assert!(policy.headers_header().starts_with("Content-Type, "));
    }
}
