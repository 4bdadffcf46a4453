use sha3::{Digest, Keccak256};

use crate::H256;

/// Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> H256 {
    let hash = Keccak256::digest(data);
    H256::from_slice(hash.as_slice())
}
