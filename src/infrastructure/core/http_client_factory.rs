//! Pooled HTTP client with retry middleware.

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates a new HTTP client with retry middleware: exponential
    /// backoff, max 3 retries. Transient (5xx/transport) failures are
    /// retried by the middleware layer before the circuit breaker or
    /// warm-up pipeline ever sees them; 4xx responses are not transient
    /// and pass straight through.
    pub fn create_client() -> ClientWithMiddleware {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);

        let client = Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }
}

/// Builds a URL with query parameters appended.
///
/// `reqwest-middleware` 0.5 doesn't expose a `.query()` method on
/// `ClientWithMiddleware`, so every caller that needs query parameters
/// builds the full URL string up front and calls `.get()` with that.
pub fn build_url_with_query<K, V>(base_url: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if params.is_empty() {
        return base_url.to_string();
    }

    let query_string: String = params
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding_encode(k.as_ref()),
                urlencoding_encode(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    if base_url.contains('?') {
        format!("{}&{}", base_url, query_string)
    } else {
        format!("{}?{}", base_url, query_string)
    }
}

fn urlencoding_encode(s: &str) -> String {
    let mut encoded = String::new();
    for c in s.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => {
                encoded.push(c);
            }
            _ => {
                for byte in c.to_string().as_bytes() {
                    encoded.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_query_string_to_bare_url() {
        let url = build_url_with_query("https://finnhub.io/api/v1/stock/symbol", &[("exchange", "US"), ("mic", "XNYS")]);
        assert_eq!(url, "https://finnhub.io/api/v1/stock/symbol?exchange=US&mic=XNYS");
    }

    #[test]
    fn no_params_leaves_url_untouched() {
        let url: String = build_url_with_query::<&str, &str>("https://finnhub.io/api/v1/stock/symbol", &[]);
        assert_eq!(url, "https://finnhub.io/api/v1/stock/symbol");
    }

    #[test]
    fn encodes_reserved_characters_in_values() {
        let url = build_url_with_query("https://example.com/x", &[("q", "a b/c")]);
        assert_eq!(url, "https://example.com/x?q=a%20b%2Fc");
    }
}
