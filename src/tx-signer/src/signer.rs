use k256::ecdsa::SigningKey;
use tx_types::error::{Result, SigningError};
use tx_types::transaction::Signature;
use tx_types::{Transaction, H160, H256, U256};

use crate::crypto;
use crate::signature::{decode_signature, encode_signature, DecodedV};

/// A transaction signing scheme.
///
/// Schemes differ only in the hashed field list and in how the recovery
/// parity is folded into `V`; signing and sender recovery are shared.
pub trait Signer {
    /// Scheme name, used in logs.
    fn name(&self) -> &'static str;

    /// Chain id bound into signatures, `None` for schemes without replay protection.
    fn chain_id(&self) -> Option<u64>;

    /// Hash of the unsigned fields of `tx`. Signature values are ignored.
    fn hash(&self, tx: &Transaction) -> H256;

    /// Folds a recovery parity (0 or 1) into a `V` value.
    fn encode_v(&self, parity: u8) -> Result<U256>;

    /// Inverse of [`Signer::encode_v`]. Values outside the scheme range are rejected.
    fn decode_v(&self, v: &U256) -> Result<DecodedV>;

    /// Additional constraints on R and S enforced before recovery.
    fn check_signature_values(&self, _r: &U256, _s: &U256) -> Result<()> {
        Ok(())
    }

    /// Returns a signed copy of `tx`. The input is left untouched.
    fn sign_tx(&self, tx: &Transaction, key: &SigningKey) -> Result<Transaction> {
        let digest = self.hash(tx);
        log::trace!("{}: signing transaction hash {digest}", self.name());

        let raw_signature = crypto::sign_digest(key, &digest)?;
        let (r, s, parity) = decode_signature(&raw_signature)?;
        let v = self.encode_v(parity)?;

        Ok(Transaction {
            v,
            r,
            s,
            ..tx.clone()
        })
    }

    /// Recovers the address that signed `tx`.
    fn sender(&self, tx: &Transaction) -> Result<H160> {
        let Signature { v, r, s } = tx.signature();
        if v.is_zero() {
            log::debug!("{}: rejecting unsigned transaction", self.name());
            return Err(SigningError::InvalidSignature(
                "transaction is not signed".to_string(),
            ));
        }

        let DecodedV { parity, chain_id } = self.decode_v(&v)?;
        if chain_id != self.chain_id() {
            log::debug!(
                "{}: chain id mismatch, signed for {chain_id:?}, expected {:?}",
                self.name(),
                self.chain_id()
            );
            return Err(SigningError::InvalidSignature(format!(
                "invalid chain id: have {chain_id:?}, want {:?}",
                self.chain_id()
            )));
        }

        self.check_signature_values(&r, &s)?;
        let raw_signature = encode_signature(&r, &s, parity)?;

        let digest = self.hash(tx);
        log::trace!("{}: recovering sender of transaction hash {digest}", self.name());

        let public_key = crypto::recover_public_key(&digest, &raw_signature)?;
        Ok(crypto::address_from_uncompressed(&public_key))
    }
}
