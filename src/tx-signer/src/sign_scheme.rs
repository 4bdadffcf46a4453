use std::sync::Arc;

use k256::ecdsa::SigningKey;
use serde::{Deserialize, Serialize};
use tx_types::error::Result;
use tx_types::{RlpBufferPool, Transaction, H160, H256, U256};

use crate::eip155::Eip155Signer;
use crate::frontier::{FrontierSigner, HomesteadSigner};
use crate::signature::DecodedV;
use crate::signer::Signer;

/// Signing scheme for transactions
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SigningScheme {
    /// No replay protection, any S accepted
    Frontier,
    /// No replay protection, low S only
    Homestead,
    /// Replay protection bound to `chain_id`
    Eip155 { chain_id: u64 },
}

impl SigningScheme {
    /// The scheme to use for new transactions on `chain_id`; 0 means no chain.
    pub fn for_chain(chain_id: u64) -> Self {
        if chain_id == 0 {
            Self::Homestead
        } else {
            Self::Eip155 { chain_id }
        }
    }

    /// Create signing object from the current scheme
    pub fn make_signer(self, pool: Arc<RlpBufferPool>) -> TxSigner {
        match self {
            SigningScheme::Frontier => TxSigner::Frontier(FrontierSigner::new(pool)),
            SigningScheme::Homestead => TxSigner::Homestead(HomesteadSigner::new(pool)),
            SigningScheme::Eip155 { chain_id } => {
                TxSigner::Eip155(Eip155Signer::new(chain_id, pool))
            }
        }
    }
}

/// Transaction signer
#[derive(Debug, Clone)]
pub enum TxSigner {
    Frontier(FrontierSigner),
    Homestead(HomesteadSigner),
    Eip155(Eip155Signer),
}

impl Signer for TxSigner {
    fn name(&self) -> &'static str {
        match self {
            Self::Frontier(signer) => signer.name(),
            Self::Homestead(signer) => signer.name(),
            Self::Eip155(signer) => signer.name(),
        }
    }

    fn chain_id(&self) -> Option<u64> {
        match self {
            Self::Frontier(signer) => signer.chain_id(),
            Self::Homestead(signer) => signer.chain_id(),
            Self::Eip155(signer) => signer.chain_id(),
        }
    }

    fn hash(&self, tx: &Transaction) -> H256 {
        match self {
            Self::Frontier(signer) => signer.hash(tx),
            Self::Homestead(signer) => signer.hash(tx),
            Self::Eip155(signer) => signer.hash(tx),
        }
    }

    fn encode_v(&self, parity: u8) -> Result<U256> {
        match self {
            Self::Frontier(signer) => signer.encode_v(parity),
            Self::Homestead(signer) => signer.encode_v(parity),
            Self::Eip155(signer) => signer.encode_v(parity),
        }
    }

    fn decode_v(&self, v: &U256) -> Result<DecodedV> {
        match self {
            Self::Frontier(signer) => signer.decode_v(v),
            Self::Homestead(signer) => signer.decode_v(v),
            Self::Eip155(signer) => signer.decode_v(v),
        }
    }

    fn check_signature_values(&self, r: &U256, s: &U256) -> Result<()> {
        match self {
            Self::Frontier(signer) => signer.check_signature_values(r, s),
            Self::Homestead(signer) => signer.check_signature_values(r, s),
            Self::Eip155(signer) => signer.check_signature_values(r, s),
        }
    }

    fn sign_tx(&self, tx: &Transaction, key: &SigningKey) -> Result<Transaction> {
        match self {
            Self::Frontier(signer) => signer.sign_tx(tx, key),
            Self::Homestead(signer) => signer.sign_tx(tx, key),
            Self::Eip155(signer) => signer.sign_tx(tx, key),
        }
    }

    fn sender(&self, tx: &Transaction) -> Result<H160> {
        match self {
            Self::Frontier(signer) => signer.sender(tx),
            Self::Homestead(signer) => signer.sender(tx),
            Self::Eip155(signer) => signer.sender(tx),
        }
    }
}
