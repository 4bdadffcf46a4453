use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};

use crate::codec::RlpBufferPool;
use crate::constant::{SECP256K1_HALF_N, SIGNED_TX_FIELD_COUNT};
use crate::error::{Result, SigningError};
use crate::keccak::keccak256;
use crate::{Bytes, H160, H256, U256};

/// ECDSA signature values as carried by a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Signature {
    pub v: U256,
    pub r: U256,
    pub s: U256,
}

impl Signature {
    /// Upper limit for signature S field.
    /// See comment to `Signature::check_malleability()` for more details.
    pub const S_UPPER_LIMIT: U256 = SECP256K1_HALF_N;

    /// EIP-2 forbids signatures with an S value in the upper half of the curve order.
    ///
    /// For every valid `(r, s)` the pair `(r, n - s)` with the opposite recovery
    /// parity is valid too, so accepting both would make the transaction hash
    /// malleable. The valid range for s is `0 < s < secp256k1n / 2 + 1`.
    pub fn check_malleability(s: &U256) -> Result<()> {
        if s > &Self::S_UPPER_LIMIT {
            return Err(SigningError::InvalidSignature(format!(
                "S value in transaction signature should not exceed {}",
                Self::S_UPPER_LIMIT
            )));
        }

        Ok(())
    }
}

/// An account-based ledger transaction.
///
/// `v`, `r` and `s` are zero until the transaction is signed. Signing never
/// mutates a transaction: signers return a new value with the three fields set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Transaction {
    /// The transaction's nonce
    pub nonce: U256,

    /// Gas Price
    #[serde(rename = "gasPrice")]
    pub gas_price: U256,

    /// Gas amount
    pub gas: U256,

    /// Recipient (None when contract creation)
    #[serde(default)]
    pub to: Option<H160>,

    /// Transferred value
    pub value: U256,

    /// Input data
    pub input: Bytes,

    /// ECDSA recovery id, encoded according to the signing scheme
    #[serde(default)]
    pub v: U256,

    /// ECDSA signature r
    #[serde(default)]
    pub r: U256,

    /// ECDSA signature s
    #[serde(default)]
    pub s: U256,
}

impl Transaction {
    /// Returns true once any of the signature values has been set.
    pub fn is_signed(&self) -> bool {
        !(self.v.is_zero() && self.r.is_zero() && self.s.is_zero())
    }

    pub fn signature(&self) -> Signature {
        Signature {
            v: self.v,
            r: self.r,
            s: self.s,
        }
    }

    /// Returns a copy of the transaction with the signature values cleared.
    pub fn unsigned(&self) -> Self {
        Self {
            v: U256::zero(),
            r: U256::zero(),
            s: U256::zero(),
            ..self.clone()
        }
    }

    /// Appends the fields every signing scheme hashes, in canonical order:
    /// nonce, gas price, gas, recipient (empty for contract creation), value, input.
    pub fn append_unsigned_fields(&self, s: &mut RlpStream) {
        s.append(&self.nonce);
        s.append(&self.gas_price);
        s.append(&self.gas);
        match &self.to {
            Some(to) => s.append(to),
            None => s.append_empty_data(),
        };
        s.append(&self.value);
        s.append(&self.input);
    }

    /// Wire encoding of the signed transaction.
    pub fn rlp_bytes_with(&self, pool: &RlpBufferPool) -> Vec<u8> {
        pool.encode_list_to_vec(SIGNED_TX_FIELD_COUNT, |s| self.append_signed_fields(s))
    }

    /// Parses the wire encoding produced by [`Transaction::rlp_bytes_with`].
    pub fn decode_rlp(bytes: &[u8]) -> Result<Self> {
        Ok(rlp::decode(bytes)?)
    }

    /// Hash identifying the signed transaction on the wire.
    pub fn tx_hash(&self, pool: &RlpBufferPool) -> H256 {
        pool.encode_list(
            SIGNED_TX_FIELD_COUNT,
            |s| self.append_signed_fields(s),
            keccak256,
        )
    }

    fn append_signed_fields(&self, s: &mut RlpStream) {
        self.append_unsigned_fields(s);
        s.append(&self.v);
        s.append(&self.r);
        s.append(&self.s);
    }
}

impl Encodable for Transaction {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(SIGNED_TX_FIELD_COUNT);
        self.append_signed_fields(s);
    }
}

impl Decodable for Transaction {
    fn decode(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        if rlp.item_count()? != SIGNED_TX_FIELD_COUNT {
            return Err(DecoderError::RlpIncorrectListLen);
        }

        let to = {
            let to = rlp.at(3)?;
            if to.is_empty() {
                None
            } else {
                Some(to.as_val()?)
            }
        };

        Ok(Self {
            nonce: rlp.val_at(0)?,
            gas_price: rlp.val_at(1)?,
            gas: rlp.val_at(2)?,
            to,
            value: rlp.val_at(4)?,
            input: rlp.val_at(5)?,
            v: rlp.val_at(6)?,
            r: rlp.val_at(7)?,
            s: rlp.val_at(8)?,
        })
    }
}
