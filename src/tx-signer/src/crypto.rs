//! Thin adapter over the secp256k1 primitive.

use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};
use tx_types::constant::{
    SECP256K1_HALF_N, SECP256K1_N, SIGNATURE_LENGTH, UNCOMPRESSED_PUBLIC_KEY_LENGTH,
};
use tx_types::error::{Result, SigningError};
use tx_types::{keccak256, H160, H256, U256};

use crate::signature::check_parity;

/// Parses a big-endian private key scalar.
pub fn signing_key_from_bytes(bytes: &[u8]) -> Result<SigningKey> {
    SigningKey::from_slice(bytes)
        .map_err(|err| SigningError::SigningFailure(format!("invalid private key: {err}")))
}

/// Signs a 32-byte digest, returning `R || S || parity`.
///
/// Signing is deterministic (RFC 6979) and always yields a low-S signature.
pub fn sign_digest(key: &SigningKey, digest: &H256) -> Result<[u8; SIGNATURE_LENGTH]> {
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(digest.as_bytes())
        .map_err(|err| SigningError::SigningFailure(format!("failed to sign digest: {err}")))?;

    // The parity byte cannot express an R that overflowed the curve order.
    if recovery_id.is_x_reduced() {
        return Err(SigningError::SigningFailure(
            "signature R value exceeds the curve order".to_string(),
        ));
    }

    let mut raw = [0u8; SIGNATURE_LENGTH];
    raw[..64].copy_from_slice(&signature.to_bytes());
    raw[64] = recovery_id.is_y_odd() as u8;

    Ok(raw)
}

/// Recovers the uncompressed public key (`0x04 || X || Y`) that produced `signature` over `digest`.
pub fn recover_public_key(
    digest: &H256,
    signature: &[u8; SIGNATURE_LENGTH],
) -> Result<[u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH]> {
    let parity = signature[64];
    check_parity(parity)?;

    // `(r, n - s)` recovers the same key with the opposite parity; the primitive
    // only accepts the low-S form.
    let mut compact = [0u8; 64];
    compact.copy_from_slice(&signature[..64]);
    let s = U256::from_big_endian(&signature[32..64]);
    let is_y_odd = if s > SECP256K1_HALF_N && s < SECP256K1_N {
        compact[32..].copy_from_slice(&(SECP256K1_N - s).to_big_endian());
        parity == 0
    } else {
        parity == 1
    };

    let ecdsa_signature = EcdsaSignature::from_slice(&compact).map_err(|err| {
        SigningError::RecoveryFailure(format!("malformed ECDSA signature: {err}"))
    })?;

    let verifying_key = VerifyingKey::recover_from_prehash(
        digest.as_bytes(),
        &ecdsa_signature,
        RecoveryId::new(is_y_odd, false),
    )
    .map_err(|err| SigningError::RecoveryFailure(format!("failed to recover public key: {err}")))?;

    let point = verifying_key.to_encoded_point(false);
    let mut public_key = [0u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH];
    public_key.copy_from_slice(point.as_bytes());

    Ok(public_key)
}

/// Address of an uncompressed public key: the low 20 bytes of the Keccak-256
/// of the key without its `0x04` prefix.
pub fn address_from_uncompressed(public_key: &[u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH]) -> H160 {
    let hash = keccak256(&public_key[1..]);
    H160::from_slice(&hash.as_bytes()[12..])
}

/// Convert a SEC1 encoded public key (compressed or not) to an address.
///
/// A key that is not a valid curve point fails with `RecoveryFailure`.
pub fn public_key_to_address(public_key: &[u8]) -> Result<H160> {
    let key = VerifyingKey::from_sec1_bytes(public_key)
        .map_err(|err| SigningError::RecoveryFailure(format!("invalid public key: {err}")))?;

    Ok(verifying_key_to_address(&key))
}

pub fn verifying_key_to_address(key: &VerifyingKey) -> H160 {
    let mut public_key = [0u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH];
    public_key.copy_from_slice(key.to_encoded_point(false).as_bytes());
    address_from_uncompressed(&public_key)
}

pub fn secret_key_to_address(key: &SigningKey) -> H160 {
    verifying_key_to_address(key.verifying_key())
}
