use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};

/// Arbitrary-precision (up to 256 bits) unsigned integer carried by transactions:
/// nonce, gas price, gas, value and the V/R/S signature values.
#[derive(
    Debug, Default, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize, Hash,
)]
#[serde(transparent)]
pub struct U256(pub ethereum_types::U256);

impl U256 {
    pub const fn new(value: ethereum_types::U256) -> Self {
        Self(value)
    }

    /// Parses a big-endian hex string, with or without the `0x` prefix.
    pub fn from_hex_str(s: &str) -> Result<Self, String> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        ethereum_types::U256::from_str(digits)
            .map(Self)
            .map_err(|err| format!("invalid U256 hex string {s:?}: {err}"))
    }

    pub const fn zero() -> Self {
        Self(ethereum_types::U256::zero())
    }

    pub const fn one() -> Self {
        Self(ethereum_types::U256::one())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Big-endian representation, zero-padded to exactly 32 bytes.
    pub fn to_big_endian(&self) -> [u8; 32] {
        let mut buffer = [0; 32];
        self.0.to_big_endian(&mut buffer);
        buffer
    }

    /// Panics if `slice` is longer than 32 bytes.
    pub fn from_big_endian(slice: &[u8]) -> Self {
        Self(ethereum_types::U256::from_big_endian(slice))
    }

    /// Returns the value as `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        (self.0.bits() <= 64).then(|| self.0.low_u64())
    }

    pub fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_div(rhs.0).map(Self)
    }

    pub fn checked_rem(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_rem(rhs.0).map(Self)
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

// Overflow panics, as for the primitive integer types.
impl Mul for U256 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Add for U256 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for U256 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Encodable for U256 {
    fn rlp_append(&self, s: &mut RlpStream) {
        self.0.rlp_append(s);
    }
}

impl Decodable for U256 {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        ethereum_types::U256::decode(rlp).map(Self)
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}
