// Endpoint builder: ordered query parameters plus identity and signature fields

use crate::client::ApiError;
use crate::signer::RequestSigner;
use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.planyo.com/rest/";

// Site credentials sent in clear with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteIdentity {
    pub site_id: String,
    pub api_key: String,
}

// Query parameters in insertion order; the API is sensitive to `method` coming first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    query_items: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(method: &str) -> Self {
        let mut endpoint = Self::default();
        endpoint.push("method", method);
        endpoint
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.query_items.push((name.into(), value.into()));
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn query_items(&self) -> &[(String, String)] {
        &self.query_items
    }

    // The first registered method wins; absent means an empty string is signed
    pub fn method(&self) -> Option<&str> {
        self.query_items
            .iter()
            .find(|(name, _)| name == "method")
            .map(|(_, value)| value.as_str())
    }

    // Appends identity and signature fields and renders the full request target.
    pub fn signed_url(
        &self,
        base_url: &str,
        identity: &SiteIdentity,
        signer: &dyn RequestSigner,
        timestamp: i64,
    ) -> Result<Url, ApiError> {
        let mut url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidEndpoint(format!("{}: {}", base_url, e)))?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidEndpoint(format!(
                "{} cannot carry a query string",
                base_url
            )));
        }

        let signature = signer.sign(self.method().unwrap_or(""), timestamp);

        url.query_pairs_mut()
            .clear()
            .extend_pairs(self.query_items.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .append_pair("site_id", &identity.site_id)
            .append_pair("api_key", &identity.api_key)
            .append_pair("hash_timestamp", &signature.timestamp.to_string())
            .append_pair("hash_key", &signature.hash);

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::Md5Signer;

    fn identity() -> SiteIdentity {
        SiteIdentity {
            site_id: "1234".to_string(),
            api_key: "api-key".to_string(),
        }
    }

    fn names(url: &Url) -> Vec<String> {
        url.query_pairs().map(|(k, _)| k.into_owned()).collect()
    }

    #[test]
    fn test_query_order_is_insertion_order_then_identity_then_signature() {
        let endpoint = Endpoint::new("get_reservation_data").with("reservation_id", "77");
        let signer = Md5Signer::new("secret");

        let url = endpoint
            .signed_url(DEFAULT_BASE_URL, &identity(), &signer, 1_700_000_000)
            .unwrap();

        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("www.planyo.com"));
        assert_eq!(url.path(), "/rest/");
        assert_eq!(
            names(&url),
            vec![
                "method",
                "reservation_id",
                "site_id",
                "api_key",
                "hash_timestamp",
                "hash_key"
            ]
        );

        let expected = signer.sign("get_reservation_data", 1_700_000_000);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[4].1, "1700000000");
        assert_eq!(pairs[5].1, expected.hash);
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let endpoint = Endpoint::new("get_reservation_data")
            .with("start_time", "2025-06-01 00:00:00")
            .with("note", "a&b=c/é");

        let url = endpoint
            .signed_url(DEFAULT_BASE_URL, &identity(), &Md5Signer::new("k"), 1)
            .unwrap();

        let query = url.query().unwrap();
        assert!(query.contains("start_time=2025-06-01+00%3A00%3A00"));
        assert!(query.contains("note=a%26b%3Dc%2F%C3%A9"));

        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(decoded[2], ("note".to_string(), "a&b=c/é".to_string()));
    }

    #[test]
    fn test_missing_method_signs_empty_string() {
        let mut endpoint = Endpoint::default();
        endpoint.push("reservation_id", "5");
        let signer = Md5Signer::new("secret");

        assert_eq!(endpoint.method(), None);
        let url = endpoint
            .signed_url(DEFAULT_BASE_URL, &identity(), &signer, 99)
            .unwrap();

        let hash = url
            .query_pairs()
            .find(|(k, _)| k == "hash_key")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(hash, signer.sign("", 99).hash);
    }

    #[test]
    fn test_existing_query_on_base_url_is_replaced() {
        let url = Endpoint::new("m")
            .signed_url(
                "https://www.planyo.com/rest/?stale=1",
                &identity(),
                &Md5Signer::new("k"),
                1,
            )
            .unwrap();
        assert_eq!(names(&url)[0], "method");
        assert!(!names(&url).contains(&"stale".to_string()));
    }

    #[test]
    fn test_invalid_base_url_is_a_typed_error() {
        let signer = Md5Signer::new("k");
        let endpoint = Endpoint::new("m");

        for base in ["not a url", "mailto:someone@example.com", "ftp://example.com/"] {
            match endpoint.signed_url(base, &identity(), &signer, 1) {
                Err(ApiError::InvalidEndpoint(_)) => {}
                other => panic!("expected InvalidEndpoint for {base}, got {other:?}"),
            }
        }
    }
}
