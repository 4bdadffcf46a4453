use crate::U256;

/// Added to the recovery parity to form V in pre EIP-155 signatures.
pub const LEGACY_V_OFFSET: u64 = 27;
/// Added to `chain_id * 2` and the recovery parity to form V in EIP-155 signatures.
pub const EIP155_V_OFFSET: u64 = 35;

/// Length of a raw `R || S || parity` signature.
pub const SIGNATURE_LENGTH: usize = 65;
/// Length of an uncompressed SEC1 public key, including the `0x04` prefix.
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;

/// Fields hashed by every scheme: nonce, gas price, gas, to, value, input.
pub const UNSIGNED_TX_FIELD_COUNT: usize = 6;
/// Fields hashed by replay-protected schemes: the unsigned ones plus `chain_id, 0, 0`.
pub const EIP155_TX_FIELD_COUNT: usize = 9;
/// Fields of a signed transaction on the wire: the unsigned ones plus `v, r, s`.
pub const SIGNED_TX_FIELD_COUNT: usize = 9;

/// Order of the secp256k1 group.
pub const SECP256K1_N: U256 = U256::new(ethereum_types::U256([
    0xBFD2_5E8C_D036_4141,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
]));

/// `SECP256K1_N / 2`, the largest S accepted once EIP-2 applies.
pub const SECP256K1_HALF_N: U256 = U256::new(ethereum_types::U256([
    0xDFE9_2F46_681B_20A0,
    0x5D57_6E73_57A4_501D,
    0xFFFF_FFFF_FFFF_FFFF,
    0x7FFF_FFFF_FFFF_FFFF,
]));
