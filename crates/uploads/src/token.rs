//! Opaque token binding an object key to its case.
//!
//! base64url(HMAC-SHA256(secret, case_id ‖ "\n" ‖ object_key)). The token is
//! handed to the client alongside the upload URL and presented again when
//! the uploaded document is attached to the case.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Mint the case-binding token for an issued object key.
#[must_use]
pub fn mint_upload_token(secret: &[u8], case_id: &str, object_key: &str) -> String {
    URL_SAFE_NO_PAD.encode(tag(secret, case_id, object_key))
}

/// Verify a presented token against the case and object key it claims.
#[must_use]
pub fn verify_upload_token(secret: &[u8], case_id: &str, object_key: &str, token: &str) -> bool {
    let Ok(presented) = URL_SAFE_NO_PAD.decode(token) else {
        return false;
    };
    let mut mac = new_mac(secret);
    mac.update(case_id.as_bytes());
    mac.update(b"\n");
    mac.update(object_key.as_bytes());
    mac.verify_slice(&presented).is_ok()
}

fn tag(secret: &[u8], case_id: &str, object_key: &str) -> Vec<u8> {
    let mut mac = new_mac(secret);
    mac.update(case_id.as_bytes());
    mac.update(b"\n");
    mac.update(object_key.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

fn new_mac(secret: &[u8]) -> HmacSha256 {
    HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn minted_token_verifies() {
        let token = mint_upload_token(SECRET, "c1", "uploads/c1/abc/bill.pdf");
        assert!(verify_upload_token(SECRET, "c1", "uploads/c1/abc/bill.pdf", &token));
    }

    #[test]
    fn token_is_bound_to_case_and_key() {
        let token = mint_upload_token(SECRET, "c1", "uploads/c1/abc/bill.pdf");
        assert!(!verify_upload_token(SECRET, "c2", "uploads/c1/abc/bill.pdf", &token));
        assert!(!verify_upload_token(SECRET, "c1", "uploads/c1/abc/other.pdf", &token));
        assert!(!verify_upload_token(b"other-secret", "c1", "uploads/c1/abc/bill.pdf", &token));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(!verify_upload_token(SECRET, "c1", "k", "not base64 !!!"));
        assert!(!verify_upload_token(SECRET, "c1", "k", ""));
    }
}
