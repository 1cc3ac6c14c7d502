//! Seventh Edition Unix DES-based hash.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! The original Unix password-hashing algorithm, extremely weak by
//! today's standards. It should be used for backward compatibility only.
//!
//! The DES computation itself is delegated to the `pwhash` crate. That
//! primitive only takes salts drawn from the crypt alphabet, so every salt
//! byte is first reduced to the six bits traditional crypt would take from
//! it, and the caller's own two salt characters head the result.
//!
//! # Example
//!
//! ```
//! use pwcrypt::unix_crypt;
//!
//! assert_eq!(unix_crypt::hash_with("xO",
//!     "password").unwrap(), "xOAFZqRz5RduI");
//! ```
//!
//! # Parameters
//!
//! * __Password length__: eight characters; anything longer is ignored.
//!
//! * __Salt length__: 2 bytes (12 bits). A longer salt is truncated. Any
//!   printable ASCII byte is accepted; NUL and non-ASCII bytes are not.
//!
//! * __Rounds__: 25 (fixed).
//!
//! # Hash Format
//!
//! The format of the hash is *`{salt}`*_`{checksum}`_, where:
//!
//! * *`{salt}`* is a 2-character Base64 encoding of the salt.
//!
//! * *`{checksum}`* is a 11-character Base64 encoding of the checksum.

use super::{Result, Scheme, TRADITIONAL_MAX_PASS_LEN};
use crate::enc_dec::{des_salt_value, encode6};
use crate::error::Error;
use crate::salt::{self, truncate_salt};

/// Salt length.
pub const SALT_LEN: usize = salt::TRADITIONAL_SALT_LEN;

#[allow(deprecated)]
pub(crate) fn crypt(pass: &[u8], salt: &str) -> Result<String> {
    let pass = &pass[..pass.len().min(TRADITIONAL_MAX_PASS_LEN)];
    let salt = truncate_salt(salt, SALT_LEN);
    if salt.len() < SALT_LEN {
	return Err(Error::InvalidSalt);
    }
    let mapped = salt.bytes()
	.map(|b| des_salt_value(b).map(encode6))
	.collect::<Option<String>>()
	.ok_or(Error::InvalidSalt)?;
    let des = pwhash::unix_crypt::hash_with(mapped.as_str(), pass).map_err(|_| Error::InvalidSalt)?;
    Ok(format!("{}{}", salt, &des[SALT_LEN..]))
}

/// Hash a password with a randomly generated salt.
///
/// An error is returned if the system random number generator fails.
pub fn hash<B: AsRef<[u8]>>(pass: B) -> Result<String> {
    let salt = salt::generate(Scheme::Traditional)?;
    crypt(pass.as_ref(), salt.as_str())
}

/// Hash a password with a user-provided salt.
///
/// An error is returned if the salt is shorter than two bytes, or if one of
/// its first two bytes is NUL or not ASCII.
pub fn hash_with<B: AsRef<[u8]>>(salt: &str, pass: B) -> Result<String> {
    let salt = salt::accept(salt, Scheme::Traditional);
    crypt(pass.as_ref(), salt.as_str())
}
