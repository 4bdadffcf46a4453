//! Data model of the transaction signing core.
//! Fixed-size hashes and integers wrap the `ethereum_types` primitives so that hex (de)serialization
//! and RLP encoding behave the same way everywhere the types are used.
//! The canonical encoder is RLP, driven through the explicit buffer pool in [`codec`].

pub mod bytes;
pub mod codec;
pub mod constant;
pub mod error;
pub mod hash;
pub mod integer;
pub mod keccak;
pub mod transaction;

pub use error::SigningError;
pub use hash::{H160, H256};
pub use integer::U256;
pub use keccak::keccak256;
pub use transaction::{Signature, Transaction};

pub use crate::bytes::Bytes;
pub use crate::codec::{PooledBuffer, RlpBufferPool};
