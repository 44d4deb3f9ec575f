#![forbid(unsafe_code)]

//! Structural identity hashing for contexts and roles.
//!
//! Identity values are 64-bit FxHasher digests over the full structural
//! content of a value. They are stable within a process run, which is all
//! the engine needs: `previous` links and messenger addresses never outlive
//! the in-memory stack they were minted for.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// Hash a value's full structure into a 64-bit identity.
pub(crate) fn fx_hash64<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}
