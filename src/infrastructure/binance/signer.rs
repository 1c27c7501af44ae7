//! HMAC-SHA256 request signing for Binance signed endpoints.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs request parameters with the account's API secret.
///
/// Binance authenticates signed endpoints with an HMAC-SHA256 digest over
/// the exact query string that is sent. Parameter order is part of the
/// contract: keys are encoded in insertion order and never re-sorted, and
/// the signed string must be byte-identical to the transmitted one.
pub struct RequestSigner {
    api_secret: String,
}

impl RequestSigner {
    pub fn new(api_secret: String) -> Self {
        Self { api_secret }
    }

    /// Encode `params` as `k=v&k=v` in insertion order, URL-encoding values.
    pub fn encode_query(params: &[(&str, String)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode_value(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Lowercase hex HMAC-SHA256 digest of `query_string`.
    pub fn sign(&self, query_string: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.api_secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(query_string.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Encode `params` and append the computed `signature` parameter.
    pub fn signed_query(&self, params: &[(&str, String)]) -> String {
        let query = Self::encode_query(params);
        let signature = self.sign(&query);
        format!("{}&signature={}", query, signature)
    }
}

/// Percent-encode a query parameter value (RFC 3986 unreserved set).
fn encode_value(s: &str) -> String {
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
