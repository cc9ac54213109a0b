//! Structural equality and hashing.
//!
//! This module provides the two capabilities hashed containers key on:
//!
//! - [`Equiv`]: structural equality
//! - [`HashCode`]: a 32-bit hash consistent with [`Equiv`]
//!
//! Hash codes are 32-bit two's-complement integers. Collections fold the hash
//! codes of their elements:
//!
//! - ordered collections with [`hash_ordered`], a [`hash_combine`] fold seeded
//!   with the hash of the first element
//! - maps with [`hash_unordered`] over `hash(key) ^ hash(value)`
//! - sets with [`hash_unordered`] over the element hashes
//!
//! These functions fix the hash values exactly, so hashes may be persisted
//! or compared across implementations.
//!
//! # Examples
//!
//! ```rust
//! use persistent_runtime::equality::{hash_combine, hash_ordered, HashCode};
//!
//! let ordered = hash_ordered([1_i64, 2].iter().map(HashCode::hash_code));
//! assert_eq!(ordered, hash_combine(1, 2));
//! assert_ne!(ordered, hash_ordered([2_i64, 1].iter().map(HashCode::hash_code)));
//! ```

use std::sync::Arc;

/// Additive constant of [`hash_combine`] (the 32-bit golden ratio).
pub const GOLDEN_RATIO: i32 = 0x9e37_79b9_u32.cast_signed();

/// Modulus applied to numeric hashes.
const NUMBER_HASH_MODULUS: i64 = 2_147_483_647;

/// Structural equality.
///
/// Unlike [`PartialEq`], `Equiv` is the notion of equality hashed containers
/// use to disambiguate keys that share a hash code.
pub trait Equiv {
    /// Returns `true` if `self` and `other` are structurally equal.
    fn equiv(&self, other: &Self) -> bool;
}

/// 32-bit structural hash.
///
/// Implementations must satisfy `a.equiv(b) => a.hash_code() == b.hash_code()`.
pub trait HashCode {
    /// Returns the hash code of `self`.
    fn hash_code(&self) -> i32;
}

/// Mixes `hash` into `seed`.
///
/// Computes `seed ^ (hash + 0x9e3779b9 + (seed << 6) + (seed >> 2))` with
/// wrapping 32-bit arithmetic and an arithmetic right shift.
#[inline]
#[must_use]
pub const fn hash_combine(seed: i32, hash: i32) -> i32 {
    seed ^ hash
        .wrapping_add(GOLDEN_RATIO)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

/// Hashes an ordered sequence of element hashes.
///
/// The empty sequence hashes to 0; otherwise the hash of the first element
/// seeds a [`hash_combine`] fold over the rest.
#[must_use]
pub fn hash_ordered<I>(hashes: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    let mut iter = hashes.into_iter();
    iter.next()
        .map_or(0, |first| iter.fold(first, hash_combine))
}

/// Hashes an unordered collection of element hashes by wrapping summation.
#[must_use]
pub fn hash_unordered<I>(hashes: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    hashes.into_iter().fold(0, i32::wrapping_add)
}

/// Hashes a map entry.
#[inline]
#[must_use]
pub const fn hash_entry(key_hash: i32, value_hash: i32) -> i32 {
    key_hash ^ value_hash
}

/// Hashes a string over its UTF-16 code units (`h = 31 * h + unit`).
#[must_use]
pub fn hash_string(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0_u32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(u32::from(unit))
        })
        .cast_signed()
}

/// Hashes an integer as `n % 2147483647`.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn hash_integer(number: i64) -> i32 {
    (number % NUMBER_HASH_MODULUS) as i32
}

/// Hashes a float as `floor(x) % 2147483647`; non-finite values hash to 0.
///
/// Integral floats hash like the equal integer.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn hash_float(number: f64) -> i32 {
    let floored = number.floor();
    if floored.is_finite() {
        (floored % NUMBER_HASH_MODULUS as f64) as i32
    } else {
        0
    }
}

// =============================================================================
// Primitive Implementations
// =============================================================================

macro_rules! impl_integer {
    ($($integer:ty),* $(,)?) => {
        $(
            impl Equiv for $integer {
                #[inline]
                fn equiv(&self, other: &Self) -> bool {
                    self == other
                }
            }

            impl HashCode for $integer {
                #[inline]
                #[allow(clippy::cast_possible_wrap, clippy::cast_lossless)]
                fn hash_code(&self) -> i32 {
                    hash_integer(*self as i64)
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl Equiv for f64 {
    #[inline]
    #[allow(clippy::float_cmp)]
    fn equiv(&self, other: &Self) -> bool {
        self == other
    }
}

impl HashCode for f64 {
    #[inline]
    fn hash_code(&self) -> i32 {
        hash_float(*self)
    }
}

impl Equiv for bool {
    #[inline]
    fn equiv(&self, other: &Self) -> bool {
        self == other
    }
}

impl HashCode for bool {
    #[inline]
    fn hash_code(&self) -> i32 {
        i32::from(*self)
    }
}

impl Equiv for char {
    #[inline]
    fn equiv(&self, other: &Self) -> bool {
        self == other
    }
}

impl HashCode for char {
    fn hash_code(&self) -> i32 {
        let mut buffer = [0_u8; 4];
        hash_string(self.encode_utf8(&mut buffer))
    }
}

impl Equiv for str {
    #[inline]
    fn equiv(&self, other: &Self) -> bool {
        self == other
    }
}

impl HashCode for str {
    #[inline]
    fn hash_code(&self) -> i32 {
        hash_string(self)
    }
}

impl Equiv for String {
    #[inline]
    fn equiv(&self, other: &Self) -> bool {
        self == other
    }
}

impl HashCode for String {
    #[inline]
    fn hash_code(&self) -> i32 {
        hash_string(self)
    }
}

impl<T: Equiv + ?Sized> Equiv for Arc<T> {
    #[inline]
    fn equiv(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other) || (**self).equiv(other)
    }
}

impl<T: HashCode + ?Sized> HashCode for Arc<T> {
    #[inline]
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

impl<T: Equiv + ?Sized> Equiv for &T {
    #[inline]
    fn equiv(&self, other: &Self) -> bool {
        (**self).equiv(*other)
    }
}

impl<T: HashCode + ?Sized> HashCode for &T {
    #[inline]
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

impl Equiv for () {
    #[inline]
    fn equiv(&self, _other: &Self) -> bool {
        true
    }
}

impl HashCode for () {
    #[inline]
    fn hash_code(&self) -> i32 {
        0
    }
}

impl<A: Equiv, B: Equiv> Equiv for (A, B) {
    fn equiv(&self, other: &Self) -> bool {
        self.0.equiv(&other.0) && self.1.equiv(&other.1)
    }
}

impl<A: HashCode, B: HashCode> HashCode for (A, B) {
    fn hash_code(&self) -> i32 {
        hash_combine(self.0.hash_code(), self.1.hash_code())
    }
}

// =============================================================================
// Tests
// =============================================================================
