//! Webhook signature verification and receipt barcode signing.
//!
//! Both gateways sign the raw webhook body with HMAC-SHA512 under the
//! account secret; comparison is constant time via the hmac crate's
//! `verify_slice`.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512};

type HmacSha512 = Hmac<Sha512>;
type HmacSha256 = Hmac<Sha256>;

/// Verify a hex-encoded HMAC-SHA512 signature over the raw request body.
pub fn verify_signature(secret: &str, body: &[u8], signature: &str) -> bool {
    if signature.is_empty() {
        return false;
    }
    let Ok(sig_bytes) = hex::decode(signature.trim()) else {
        return false;
    };

    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(body);
    mac.verify_slice(&sig_bytes).is_ok()
}

/// Hex HMAC-SHA256 used for receipt barcode references.
pub fn sign_sha256(secret: &str, value: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(value.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_sha512(secret: &str, body: &[u8]) -> String {
        let mut mac = HmacSha512::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_valid_signature() {
        let body = br#"{"event":"charge.success"}"#;
        let sig = sign_sha512("sk_test_abc", body);
        assert!(verify_signature("sk_test_abc", body, &sig));
    }

    #[test]
    fn rejects_tampered_body() {
        let sig = sign_sha512("sk_test_abc", b"original");
        assert!(!verify_signature("sk_test_abc", b"tampered", &sig));
    }

    #[test]
    fn rejects_wrong_secret_and_garbage() {
        let body = b"payload";
        let sig = sign_sha512("secret-a", body);
        assert!(!verify_signature("secret-b", body, &sig));
        assert!(!verify_signature("secret-a", body, ""));
        assert!(!verify_signature("secret-a", body, "not-hex"));
    }

    #[test]
    fn barcode_reference_is_stable_hex() {
        let a = sign_sha256("app-secret", "id:5000");
        let b = sign_sha256("app-secret", "id:5000");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }
}
