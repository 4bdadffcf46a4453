use tx_types::constant::SIGNATURE_LENGTH;
use tx_types::error::{Result, SigningError};
use tx_types::U256;

/// Recovery parity and the chain id carried by a decoded `V` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedV {
    /// 0 or 1
    pub parity: u8,
    /// `None` for schemes without replay protection
    pub chain_id: Option<u64>,
}

/// Fails unless `parity` is a valid recovery parity, 0 or 1.
pub fn check_parity(parity: u8) -> Result<()> {
    if parity > 1 {
        return Err(SigningError::InvalidSignature(format!(
            "recovery parity must be 0 or 1, got {parity}"
        )));
    }

    Ok(())
}

/// Packs `R || S || parity` into the raw 65-byte signature form.
///
/// R and S are left-padded to 32 bytes each. A zero R or S, or a parity other than 0 or 1,
/// is rejected.
pub fn encode_signature(r: &U256, s: &U256, parity: u8) -> Result<[u8; SIGNATURE_LENGTH]> {
    if r.is_zero() || s.is_zero() {
        return Err(SigningError::InvalidSignature(
            "R and S must be non-zero".to_string(),
        ));
    }
    check_parity(parity)?;

    let mut signature = [0u8; SIGNATURE_LENGTH];
    signature[..32].copy_from_slice(&r.to_big_endian());
    signature[32..64].copy_from_slice(&s.to_big_endian());
    signature[64] = parity;

    Ok(signature)
}

/// Splits a raw signature into `(R, S, parity)`.
pub fn decode_signature(signature: &[u8]) -> Result<(U256, U256, u8)> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(SigningError::InvalidSignature(format!(
            "wrong size for signature: got {}, want {SIGNATURE_LENGTH}",
            signature.len()
        )));
    }

    let r = U256::from_big_endian(&signature[..32]);
    let s = U256::from_big_endian(&signature[32..64]);

    Ok((r, s, signature[64]))
}
