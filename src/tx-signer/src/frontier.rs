use std::sync::Arc;

use tx_types::constant::{LEGACY_V_OFFSET, UNSIGNED_TX_FIELD_COUNT};
use tx_types::error::{Result, SigningError};
use tx_types::transaction::Signature;
use tx_types::{keccak256, RlpBufferPool, Transaction, H256, U256};

use crate::signature::{check_parity, DecodedV};
use crate::signer::Signer;

/// The original, unprotected scheme: `V = 27 + parity` and no chain id in the hash.
///
/// A Frontier signature is valid on every chain.
#[derive(Debug, Clone, Default)]
pub struct FrontierSigner {
    pool: Arc<RlpBufferPool>,
}

impl FrontierSigner {
    pub fn new(pool: Arc<RlpBufferPool>) -> Self {
        Self { pool }
    }
}

impl Signer for FrontierSigner {
    fn name(&self) -> &'static str {
        "frontier"
    }

    fn chain_id(&self) -> Option<u64> {
        None
    }

    fn hash(&self, tx: &Transaction) -> H256 {
        self.pool.encode_list(
            UNSIGNED_TX_FIELD_COUNT,
            |s| tx.append_unsigned_fields(s),
            keccak256,
        )
    }

    fn encode_v(&self, parity: u8) -> Result<U256> {
        check_parity(parity)?;
        Ok(U256::from(LEGACY_V_OFFSET + u64::from(parity)))
    }

    fn decode_v(&self, v: &U256) -> Result<DecodedV> {
        let parity = v
            .checked_sub(&U256::from(LEGACY_V_OFFSET))
            .and_then(|parity| parity.to_u64())
            .filter(|parity| *parity <= 1)
            .ok_or_else(|| {
                log::debug!("{}: invalid V value {v}", self.name());
                SigningError::InvalidSignature(format!("invalid V value {v}"))
            })?;

        Ok(DecodedV {
            parity: parity as u8,
            chain_id: None,
        })
    }
}

/// Frontier with the EIP-2 rule: signatures with S above `secp256k1n / 2` are rejected.
#[derive(Debug, Clone, Default)]
pub struct HomesteadSigner {
    frontier: FrontierSigner,
}

impl HomesteadSigner {
    pub fn new(pool: Arc<RlpBufferPool>) -> Self {
        Self {
            frontier: FrontierSigner::new(pool),
        }
    }
}

impl Signer for HomesteadSigner {
    fn name(&self) -> &'static str {
        "homestead"
    }

    fn chain_id(&self) -> Option<u64> {
        None
    }

    fn hash(&self, tx: &Transaction) -> H256 {
        self.frontier.hash(tx)
    }

    fn encode_v(&self, parity: u8) -> Result<U256> {
        self.frontier.encode_v(parity)
    }

    fn decode_v(&self, v: &U256) -> Result<DecodedV> {
        self.frontier.decode_v(v)
    }

    fn check_signature_values(&self, _r: &U256, s: &U256) -> Result<()> {
        Signature::check_malleability(s)
    }
}
