//! Transaction signing schemes.
//!
//! A [`Signer`] hashes a transaction, signs it and recovers its sender.
//! Schemes are selected explicitly through [`SigningScheme`]; they never get
//! inferred from the transaction being signed or checked.

pub mod crypto;
pub mod eip155;
pub mod frontier;
pub mod sign_scheme;
pub mod signature;
pub mod signer;

pub use eip155::Eip155Signer;
pub use frontier::{FrontierSigner, HomesteadSigner};
pub use k256::ecdsa::SigningKey;
pub use sign_scheme::{SigningScheme, TxSigner};
pub use signature::{decode_signature, encode_signature, DecodedV};
pub use signer::Signer;
