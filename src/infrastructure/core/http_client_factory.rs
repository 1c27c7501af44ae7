use reqwest::Client;
use std::time::Duration;

/// Fixed timeout for every exchange call. No retry layer: a failed signed
/// POST is reported, never re-sent.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct HttpClientFactory;

impl HttpClientFactory {
    pub fn create_client() -> Client {
        Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}
