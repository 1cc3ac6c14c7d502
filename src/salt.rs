//! Salt generation and acceptance.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! A generated salt is drawn from the system random number generator, one
//! byte per character, and mapped through the crypt alphabet. A supplied
//! salt is only truncated: its characters are *not* checked against the
//! alphabet, and end up in the hash input as they are. Callers wanting a
//! stricter policy can test a salt with [`Salt::is_alphabet_only`].
//!
//! # Example
//!
//! ```
//! use pwcrypt::{salt, Scheme};
//!
//! let s = salt::generate(Scheme::Md5).unwrap();
//! assert_eq!(s.len(), 8);
//! assert!(s.is_alphabet_only());
//!
//! let s = salt::accept("abcdefghij", Scheme::Md5);
//! assert_eq!(s.as_str(), "abcdefgh");
//! ```

use std::fmt;
use rand::RngCore;
use rand::rngs::OsRng;
use crate::enc_dec::{encode6, is_hash64};
use crate::error::Error;
use crate::{Result, Scheme};

/// DES crypt salt length.
pub const TRADITIONAL_SALT_LEN: usize = 2;
/// Maximum (and default) MD5 crypt salt length.
pub const MD5_MAX_SALT_LEN: usize = 8;

/// Where a salt came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaltSource {
    /// Drawn from a random number generator.
    Generated,
    /// Provided by the caller.
    Supplied,
}

/// A salt ready to be handed to a hashing engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Salt {
    value: String,
    source: SaltSource,
}

impl Salt {
    /// The salt string.
    pub fn as_str(&self) -> &str {
	&self.value
    }

    /// Where the salt came from.
    pub fn source(&self) -> SaltSource {
	self.source
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
	self.value.len()
    }

    /// Returns `true` for an empty salt.
    pub fn is_empty(&self) -> bool {
	self.value.is_empty()
    }

    /// Returns `true` if every character belongs to the crypt alphabet.
    ///
    /// Always `true` for a generated salt.
    pub fn is_alphabet_only(&self) -> bool {
	self.value.chars().all(is_hash64)
    }

    /// Consume the salt, returning the string.
    pub fn into_string(self) -> String {
	self.value
    }
}

impl AsRef<str> for Salt {
    fn as_ref(&self) -> &str {
	&self.value
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	f.write_str(&self.value)
    }
}

/// Generate a fresh salt for the scheme using the system random number generator.
///
/// An error is returned if the generator fails.
pub fn generate(scheme: Scheme) -> Result<Salt> {
    generate_with(&mut OsRng, scheme)
}

/// Generate a fresh salt for the scheme using the provided generator.
pub fn generate_with<R: RngCore + ?Sized>(rng: &mut R, scheme: Scheme) -> Result<Salt> {
    let mut raw = [0u8; MD5_MAX_SALT_LEN];
    let raw = &mut raw[..scheme.salt_len()];
    rng.try_fill_bytes(raw).map_err(|e| Error::RandomSourceUnavailable(e.to_string()))?;
    let value = raw.iter().map(|&b| encode6(b)).collect();
    Ok(Salt { value, source: SaltSource::Generated })
}

/// Accept a caller-supplied salt, truncating it to the scheme's maximum length.
///
/// The limit counts bytes. A multi-byte character that would straddle the
/// limit is dropped whole.
pub fn accept(salt: &str, scheme: Scheme) -> Salt {
    Salt {
	value: truncate_salt(salt, scheme.salt_len()).to_owned(),
	source: SaltSource::Supplied,
    }
}

pub(crate) fn truncate_salt(s: &str, max_len: usize) -> &str {
    let mut end = max_len.min(s.len());
    while !s.is_char_boundary(end) {
	end -= 1;
    }
    &s[..end]
}
