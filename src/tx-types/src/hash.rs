use std::fmt;

use derive_more::Display;
use hex::FromHexError;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

/// Fixed-size hash wrapper with hex (de)serialization.
#[derive(Debug, Default, Clone, Copy, PartialOrd, Ord, Eq, PartialEq, Display, Hash)]
pub struct Hash<T>(pub T);

/// 20-byte account address.
pub type H160 = Hash<ethereum_types::H160>;
/// 32-byte digest.
pub type H256 = Hash<ethereum_types::H256>;

fn decode_hex<const SIZE: usize>(s: &str) -> Result<[u8; SIZE], FromHexError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);

    let mut out = [0u8; SIZE];
    hex::decode_to_slice(digits, &mut out)?;
    Ok(out)
}

macro_rules! impl_fixed_hash {
    ($name:ident, $size:expr) => {
        impl $name {
            /// Panics if `slice` has the wrong length.
            pub fn from_slice(slice: &[u8]) -> Self {
                Hash(ethereum_types::$name::from_slice(slice))
            }

            /// Parses exactly the expected number of hex digits, with or without `0x`.
            pub fn from_hex_str(s: &str) -> Result<Self, FromHexError> {
                decode_hex::<$size>(s).map(|bytes| Hash(ethereum_types::$name(bytes)))
            }

            pub fn to_hex_str(&self) -> String {
                format!("0x{self:x}")
            }

            pub fn as_bytes(&self) -> &[u8] {
                self.0.as_bytes()
            }
        }

        impl fmt::LowerHex for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::LowerHex::fmt(&self.0, f)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(&self.to_hex_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(d)?;
                $name::from_hex_str(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

impl_fixed_hash!(H160, 20);
impl_fixed_hash!(H256, 32);

impl Encodable for H160 {
    fn rlp_append(&self, s: &mut RlpStream) {
        self.0.rlp_append(s);
    }
}

impl Decodable for H160 {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        ethereum_types::H160::decode(rlp).map(Hash)
    }
}
