use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use jr_common::{Ed25519PubKey, Ed25519SecretKey, Ed25519Signature};

pub fn sign_message(message: &[u8], secret_key: &Ed25519SecretKey) -> Ed25519Signature {
    let signing_key = SigningKey::from_bytes(secret_key);
    let signature = signing_key.sign(message);
    signature.to_bytes()
}

pub fn verify_signature(
    message: &[u8],
    public_key: &Ed25519PubKey,
    signature: &Ed25519Signature,
) -> bool {
    let verifying_key = match VerifyingKey::from_bytes(public_key) {
        Ok(key) => key,
        Err(_) => return false, // Invalid public key
    };
    let signature = Signature::from_bytes(signature);
    verifying_key.verify(message, &signature).is_ok()
}
