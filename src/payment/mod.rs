use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verifies Razorpay checkout callbacks. Razorpay signs
/// `provider_order_id|payment_id` with the merchant key secret and sends the
/// hex HMAC alongside; we recompute it and compare.
#[derive(Clone)]
pub struct PaymentGate {
    key_secret: String,
}

impl PaymentGate {
    pub fn new(key_secret: String) -> Self {
        Self { key_secret }
    }

    pub fn from_env() -> Self {
        let key_secret =
            std::env::var("RAZORPAY_KEY_SECRET").expect("RAZORPAY_KEY_SECRET must be set");
        Self::new(key_secret)
    }

    pub fn verify_signature(
        &self,
        provider_order_id: &str,
        provider_payment_id: &str,
        supplied_signature: &str,
    ) -> bool {
        // An empty key makes the HMAC publicly computable, so never accept one.
        if self.key_secret.is_empty() {
            warn!("payment gate has no key secret, rejecting signature");
            return false;
        }
        let payload = format!("{}|{}", provider_order_id, provider_payment_id);
        let expected = sign_payload(&payload, &self.key_secret);
        constant_time_eq(supplied_signature.as_bytes(), expected.as_bytes())
    }
}

/// HMAC-SHA256 sign a payload string, returning the hex-encoded signature.
fn sign_payload(payload: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
