// Request signing for the booking API
// The upstream API authenticates each call with hex(md5(hash_key + timestamp + method)).
// MD5 is mandated by the API for compatibility only and gives no integrity guarantee.

use md5::{Digest, Md5};
use std::fmt;

// Signature fields attached to every outbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub timestamp: i64,
    pub hash: String,
}

// Signing scheme seam, so the client never depends on MD5 directly
pub trait RequestSigner: Send + Sync + 'static {
    fn sign(&self, method: &str, timestamp: i64) -> Signature;
}

#[derive(Clone)]
pub struct Md5Signer {
    hash_key: String,
}

impl Md5Signer {
    pub fn new(hash_key: impl Into<String>) -> Self {
        Self {
            hash_key: hash_key.into(),
        }
    }
}

impl fmt::Debug for Md5Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Md5Signer")
            .field("hash_key", &"<redacted>")
            .finish()
    }
}

impl RequestSigner for Md5Signer {
    fn sign(&self, method: &str, timestamp: i64) -> Signature {
        let mut hasher = Md5::new();
        hasher.update(self.hash_key.as_bytes());
        hasher.update(timestamp.to_string().as_bytes());
        hasher.update(method.as_bytes());

        Signature {
            timestamp,
            hash: hex::encode(hasher.finalize()),
        }
    }
}
