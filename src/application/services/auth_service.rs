//! Credential verification for HTTP Basic authentication.

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac, digest::Key};
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verifies a username/password pair against the configured credentials.
///
/// Both the expected and the supplied pair are MAC'd with HMAC-SHA256 under a
/// key generated at construction, and compared with [`Mac::verify_slice`]. The
/// comparison therefore runs in constant time regardless of where the inputs
/// first differ, while still requiring a byte-for-byte match.
pub struct AuthService {
    username: String,
    key: Key<HmacSha256>,
    expected_tag: Vec<u8>,
}

impl AuthService {
    /// Creates a verifier for the given pair.
    pub fn new(username: impl Into<String>, password: impl AsRef<str>) -> Self {
        let username = username.into();

        let mut key = Key::<HmacSha256>::default();
        rand::rng().fill_bytes(&mut key);

        let expected_tag = mac_credentials(&key, &username, password.as_ref())
            .finalize()
            .into_bytes()
            .to_vec();

        Self {
            username,
            key,
            expected_tag,
        }
    }

    /// Returns `true` when both username and password match exactly.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        mac_credentials(&self.key, username, password)
            .verify_slice(&self.expected_tag)
            .is_ok()
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Builds an `Authorization` header value for the Basic scheme.
///
/// ```
/// use receptor_gate::application::services::auth_service::basic_authorization;
///
/// assert_eq!(basic_authorization("user", "pass"), "Basic dXNlcjpwYXNz");
/// ```
pub fn basic_authorization(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Length-prefixes the username so `("ab", "c")` and `("a", "bc")` differ.
fn mac_credentials(key: &Key<HmacSha256>, username: &str, password: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new(key);
    mac.update(&(username.len() as u64).to_be_bytes());
    mac.update(username.as_bytes());
    mac.update(password.as_bytes());
    mac
}
