//! Field element of the BN254 scalar field, the only value type of the VM.

use crate::consts::{FIELD_MODULUS_BYTES, FIELD_SIZE};

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use std::ops::{Add, Mul, Sub};
use std::sync::OnceLock;
use std::{fmt, str};

/// Modulus of the field as a big integer.
pub fn modulus() -> &'static BigUint {
    static MODULUS: OnceLock<BigUint> = OnceLock::new();

    MODULUS.get_or_init(|| BigUint::from_bytes_be(&FIELD_MODULUS_BYTES))
}

/// Element of the prime field.
///
/// The inner integer is always the canonical representative, strictly lower than
/// [`modulus`]. Ordering compares these representatives as plain integers.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "BigUint", into = "BigUint"))]
pub struct Fr(BigUint);

/// The provided integer is not a canonical field representative.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("value is not lower than the field modulus")]
pub struct NonCanonicalFieldElement;

impl Fr {
    /// Reduce an arbitrary integer into the field.
    pub fn new(value: BigUint) -> Self {
        if &value < modulus() {
            Self(value)
        } else {
            Self(value % modulus())
        }
    }

    /// Additive identity.
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Multiplicative identity.
    pub fn one() -> Self {
        Self(BigUint::one())
    }

    /// Interpret big-endian bytes as an integer and reduce it into the field.
    pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        Self::new(BigUint::from_bytes_be(bytes))
    }

    /// Big-endian, zero-padded representation of the canonical integer.
    pub fn to_be_bytes(&self) -> [u8; FIELD_SIZE] {
        let bytes = self.0.to_bytes_be();
        let mut out = [0u8; FIELD_SIZE];

        out[FIELD_SIZE - bytes.len()..].copy_from_slice(&bytes);

        out
    }

    /// Return `true` if this is the additive identity.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Canonical integer representative.
    pub const fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Canonical integer as `u32`, if it fits.
    pub fn to_u32(&self) -> Option<u32> {
        self.0.to_u32()
    }

    /// Canonical integer as `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    /// Multiplicative inverse; `None` for zero.
    pub fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }

        // Fermat: a^(p-2) = a^-1 mod p
        let exponent = modulus() - BigUint::from(2u8);

        Some(Self(self.0.modpow(&exponent, modulus())))
    }

    /// Field division; `None` when dividing by zero.
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        rhs.inverse().map(|inv| self * &inv)
    }

    #[cfg(feature = "random")]
    /// Uniformly distributed field element, up to a negligible modular bias.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: rand::Rng + ?Sized,
    {
        let mut bytes = [0u8; FIELD_SIZE + 16];
        rng.fill_bytes(&mut bytes);

        Self::from_be_bytes_mod_order(&bytes)
    }
}

impl<'a> Add<&'a Fr> for &'a Fr {
    type Output = Fr;

    fn add(self, rhs: &'a Fr) -> Fr {
        let sum = &self.0 + &rhs.0;

        if &sum >= modulus() {
            Fr(sum - modulus())
        } else {
            Fr(sum)
        }
    }
}

impl<'a> Sub<&'a Fr> for &'a Fr {
    type Output = Fr;

    fn sub(self, rhs: &'a Fr) -> Fr {
        if self.0 >= rhs.0 {
            Fr(&self.0 - &rhs.0)
        } else {
            Fr(modulus() - &rhs.0 + &self.0)
        }
    }
}

impl<'a> Mul<&'a Fr> for &'a Fr {
    type Output = Fr;

    fn mul(self, rhs: &'a Fr) -> Fr {
        Fr((&self.0 * &rhs.0) % modulus())
    }
}

impl Add for Fr {
    type Output = Fr;

    fn add(self, rhs: Fr) -> Fr {
        &self + &rhs
    }
}

impl Sub for Fr {
    type Output = Fr;

    fn sub(self, rhs: Fr) -> Fr {
        &self - &rhs
    }
}

impl Mul for Fr {
    type Output = Fr;

    fn mul(self, rhs: Fr) -> Fr {
        &self * &rhs
    }
}

impl From<u64> for Fr {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u32> for Fr {
    fn from(value: u32) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<bool> for Fr {
    fn from(value: bool) -> Self {
        Self(BigUint::from(value as u8))
    }
}

impl TryFrom<BigUint> for Fr {
    type Error = NonCanonicalFieldElement;

    fn try_from(value: BigUint) -> Result<Self, Self::Error> {
        if &value < modulus() {
            Ok(Self(value))
        } else {
            Err(NonCanonicalFieldElement)
        }
    }
}

impl From<Fr> for BigUint {
    fn from(value: Fr) -> Self {
        value.0
    }
}

impl fmt::Display for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:064x}", self.0)
    }
}

impl fmt::Debug for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fr({:#x})", self.0)
    }
}

impl str::FromStr for Fr {
    type Err = NonCanonicalFieldElement;

    /// Parse a decimal or `0x`-prefixed hexadecimal canonical representative.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = match s.strip_prefix("0x") {
            Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
            None => BigUint::parse_bytes(s.as_bytes(), 10),
        };

        value.ok_or(NonCanonicalFieldElement).and_then(Fr::try_from)
    }
}
