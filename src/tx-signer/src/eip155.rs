use std::sync::Arc;

use tx_types::constant::{EIP155_TX_FIELD_COUNT, EIP155_V_OFFSET};
use tx_types::error::{Result, SigningError};
use tx_types::transaction::Signature;
use tx_types::{keccak256, RlpBufferPool, Transaction, H256, U256};

use crate::signature::{check_parity, DecodedV};
use crate::signer::Signer;

/// Replay-protected scheme: the chain id is hashed together with the
/// transaction and folded into `V = chain_id * 2 + 35 + parity`.
///
/// Signatures must be in the low-S form, as in Homestead.
#[derive(Debug, Clone)]
pub struct Eip155Signer {
    chain_id: u64,
    chain_id_mul: U256,
    pool: Arc<RlpBufferPool>,
}

impl Eip155Signer {
    pub fn new(chain_id: u64, pool: Arc<RlpBufferPool>) -> Self {
        Self {
            chain_id,
            chain_id_mul: U256::from(chain_id) * U256::from(2u64),
            pool,
        }
    }
}

impl Signer for Eip155Signer {
    fn name(&self) -> &'static str {
        "eip155"
    }

    fn chain_id(&self) -> Option<u64> {
        Some(self.chain_id)
    }

    fn hash(&self, tx: &Transaction) -> H256 {
        self.pool.encode_list(
            EIP155_TX_FIELD_COUNT,
            |s| {
                tx.append_unsigned_fields(s);
                s.append(&self.chain_id);
                s.append(&0u8);
                s.append(&0u8);
            },
            keccak256,
        )
    }

    fn encode_v(&self, parity: u8) -> Result<U256> {
        check_parity(parity)?;
        Ok(self.chain_id_mul + U256::from(EIP155_V_OFFSET + u64::from(parity)))
    }

    fn decode_v(&self, v: &U256) -> Result<DecodedV> {
        let offset = v
            .checked_sub(&U256::from(EIP155_V_OFFSET))
            .ok_or_else(|| {
                log::debug!("{}: V value {v} is below {EIP155_V_OFFSET}", self.name());
                SigningError::InvalidSignature(format!(
                    "invalid V value {v}, replay protected signatures start at {EIP155_V_OFFSET}"
                ))
            })?;

        let two = U256::from(2u64);
        let chain_id = offset
            .checked_div(&two)
            .and_then(|chain_id| chain_id.to_u64())
            .ok_or_else(|| {
                SigningError::InvalidSignature(format!("chain id of V value {v} overflows u64"))
            })?;
        let parity = offset
            .checked_rem(&two)
            .and_then(|parity| parity.to_u64())
            .unwrap_or_default();

        Ok(DecodedV {
            parity: parity as u8,
            chain_id: Some(chain_id),
        })
    }

    fn check_signature_values(&self, _r: &U256, s: &U256) -> Result<()> {
        Signature::check_malleability(s)
    }
}

#[cfg(test)]
mod tests {

    use k256::ecdsa::SigningKey;
    use tx_types::{Bytes, H160};

    use super::*;
    use crate::crypto::secret_key_to_address;
    use crate::frontier::FrontierSigner;

    fn signer(chain_id: u64) -> Eip155Signer {
        Eip155Signer::new(chain_id, Arc::default())
    }

    fn transaction() -> Transaction {
        Transaction {
            nonce: 1u64.into(),
            gas_price: 10u64.into(),
            gas: 50_000u64.into(),
            to: None,
            value: 0u64.into(),
            input: Bytes(vec![0x60, 0x80, 0x60, 0x40]),
            ..Default::default()
        }
    }

    #[test]
    fn test_v_encoding_is_invertible() {
        for chain_id in [1u64, 1337, 355113, u64::MAX] {
            let signer = signer(chain_id);
            for parity in 0..=1u8 {
                let v = signer.encode_v(parity).unwrap();
                assert_eq!(
                    signer.decode_v(&v).unwrap(),
                    DecodedV {
                        parity,
                        chain_id: Some(chain_id)
                    }
                );
            }
        }
    }

    #[test]
    fn test_encode_v() {
        assert_eq!(signer(1).encode_v(0).unwrap(), U256::from(37u64));
        assert_eq!(signer(1).encode_v(1).unwrap(), U256::from(38u64));
        assert_eq!(signer(355113).encode_v(1).unwrap(), U256::from(710262u64));
        assert!(signer(1).encode_v(2).unwrap_err().is_invalid_signature());
    }

    #[test]
    fn test_v_below_minimum_is_rejected() {
        let signer = signer(1);
        for v in [0u64, 27, 28, 34] {
            let err = signer.decode_v(&U256::from(v)).unwrap_err();
            assert!(err.is_invalid_signature(), "v = {v}");
        }
        assert_eq!(
            signer.decode_v(&U256::from(35u64)).unwrap(),
            DecodedV {
                parity: 0,
                chain_id: Some(0)
            }
        );
    }

    #[test]
    fn test_chain_id_is_part_of_hash() {
        let tx = transaction();
        assert_ne!(signer(1).hash(&tx), signer(2).hash(&tx));
        assert_ne!(signer(1).hash(&tx), FrontierSigner::default().hash(&tx));
    }

    #[test]
    fn test_sign_and_recover_sender() {
        let key = SigningKey::random(&mut rand::thread_rng());
        let signer = signer(355113);
        let signed = signer.sign_tx(&transaction(), &key).unwrap();

        assert!(
            signed.v == U256::from(710261u64) || signed.v == U256::from(710262u64),
            "unexpected v {}",
            signed.v
        );
        assert_eq!(signer.sender(&signed).unwrap(), secret_key_to_address(&key));
    }

    #[test]
    fn test_other_chain_signature_is_rejected() {
        let key = SigningKey::random(&mut rand::thread_rng());
        let signed = signer(1).sign_tx(&transaction(), &key).unwrap();

        let err = signer(2).sender(&signed).unwrap_err();
        assert!(err.is_invalid_signature());
    }

    #[test]
    fn test_legacy_signature_is_rejected() {
        let key = SigningKey::random(&mut rand::thread_rng());
        let signed = FrontierSigner::default()
            .sign_tx(&transaction(), &key)
            .unwrap();

        let err = signer(1).sender(&signed).unwrap_err();
        assert!(err.is_invalid_signature());
    }
}
