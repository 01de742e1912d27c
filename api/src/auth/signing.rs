//! Signing of the session cookie value.
//!
//! The cookie carries `"{user_id}.{signature}"` where the signature is
//! the URL-safe base64 HMAC-SHA256 of the user id under the configured
//! secret. Verification recomputes the signature and compares in
//! constant time.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::COOKIE_NAME;

type HmacSha256 = Hmac<Sha256>;

pub struct SessionSigner {
    secret: [u8; 32],
}

impl SessionSigner {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    /// Sign a user id: returns "user_id.signature"
    pub fn sign(&self, user_id: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(user_id.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{}.{}", user_id, signature)
    }

    /// Verify a signed cookie value, returns the user id if valid
    pub fn verify(&self, signed: &str) -> Option<String> {
        let (user_id, signature) = signed.rsplit_once('.')?;

        let expected_sig = {
            let mut mac =
                HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
            mac.update(user_id.as_bytes());
            URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
        };

        // Constant-time comparison
        if signature.len() != expected_sig.len() {
            return None;
        }

        let matches = signature
            .as_bytes()
            .iter()
            .zip(expected_sig.as_bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));

        if matches == 0 {
            Some(user_id.to_string())
        } else {
            None
        }
    }
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!("{COOKIE_NAME}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0{secure_flag}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let signer = SessionSigner::new([0u8; 32]);
        let user_id = "01ARZ3NDEKTSV4RRFFQ69G5FAV";

        let signed = signer.sign(user_id);
        assert!(signed.contains('.'));

        let verified = signer.verify(&signed);
        assert_eq!(verified, Some(user_id.to_string()));
    }

    #[test]
    fn test_verify_rejects_tampered_signature() {
        let signer = SessionSigner::new([0u8; 32]);
        let signed = signer.sign("01ARZ3NDEKTSV4RRFFQ69G5FAV");

        let tampered = format!("{}x", signed);
        assert_eq!(signer.verify(&tampered), None);
    }

    #[test]
    fn test_verify_rejects_tampered_user_id() {
        let signer = SessionSigner::new([0u8; 32]);
        let signed = signer.sign("01ARZ3NDEKTSV4RRFFQ69G5FAV");

        // Replace user id but keep signature
        let parts: Vec<&str> = signed.split('.').collect();
        let tampered = format!("01BX5ZZKBKACTAV9WEVGEMMVRZ.{}", parts[1]);

        assert_eq!(signer.verify(&tampered), None);
    }

    #[test]
    fn test_verify_rejects_missing_signature() {
        let signer = SessionSigner::new([0u8; 32]);
        assert_eq!(signer.verify("no_signature_here"), None);
    }

    #[test]
    fn test_different_secrets_produce_different_signatures() {
        let signer1 = SessionSigner::new([0u8; 32]);
        let signer2 = SessionSigner::new([1u8; 32]);

        let user_id = "01ARZ3NDEKTSV4RRFFQ69G5FAV";
        let signed1 = signer1.sign(user_id);
        let signed2 = signer2.sign(user_id);

        assert_ne!(signed1, signed2);

        // Cross-verification should fail
        assert_eq!(signer1.verify(&signed2), None);
        assert_eq!(signer2.verify(&signed1), None);
    }

    #[test]
    fn test_clear_cookie_format_http() {
        let cookie = clear_session_cookie(false);

        assert!(cookie.starts_with("quill_session=;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_format_https() {
        let cookie = clear_session_cookie(true);

        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Secure"));
    }
}
