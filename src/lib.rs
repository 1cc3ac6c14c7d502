//! Traditional DES and MD5-based Unix password hashing.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! This crate produces password hashes in the formats still found in legacy
//! Unix account databases and Apache `htpasswd` files:
//!
//! * [DES crypt](unix_crypt), the 13-character traditional encoding.
//!
//! * [MD5 crypt](md5_crypt), the BSD `$1$` iterated MD5 encoding.
//!
//! * [Apache MD5](apr1_crypt), the `$apr1$` encoding, which is the same
//!   algorithm under a different magic string.
//!
//! None of these should be used for new passwords. They exist here for
//! compatibility with systems that can't accept anything else.
//!
//! # Getting Started
//!
//! Add the following to the `[dependencies]` section of your `Cargo.toml`:
//!
//! ```toml
//! pwcrypt = "1"
//! ```
//!
//! # Examples
//!
//! To hash a password with a known salt:
//!
//! ```
//! use pwcrypt::md5_crypt;
//!
//! assert_eq!(md5_crypt::hash_with("5pZSV9va", "password"),
//!     "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0");
//! ```
//!
//! To pick the scheme at run time and let the crate generate the salt:
//!
//! ```
//! use pwcrypt::{HashSetup, Scheme};
//!
//! let setup = HashSetup::new(Scheme::Apr1);
//! let h = pwcrypt::hash_with(&setup, "password").unwrap();
//! assert!(h.starts_with("$apr1$"));
//! ```
//!
//! # Password length
//!
//! DES crypt looks at no more than eight characters of a password, and the
//! MD5 schemes are conventionally capped at 256. The top-level [`hash_with`]
//! applies these limits (or the one given in [`HashSetup`]) and emits a
//! `tracing` warning when it has to truncate, unless the setup is quiet.
//!
//! # Features
//!
//! The `des` and `md5` features, both on by default, select which schemes
//! are compiled in. Asking for a scheme that was left out yields
//! [`Error::InvalidSchemeSelection`](error::Error::InvalidSchemeSelection).

#![warn(missing_docs)]

mod enc_dec;
pub mod error;
pub mod salt;
#[cfg(feature = "des")]
pub mod unix_crypt;
#[cfg(feature = "md5")]
pub mod md5_crypt;
#[cfg(feature = "md5")]
pub mod apr1_crypt;

use std::fmt;
use tracing::{debug, warn};
use crate::error::Error;
use crate::salt::Salt;

/// Type alias for the Result type.
pub type Result<T> = std::result::Result<T, error::Error>;

/// Maximum password length for DES crypt.
pub const TRADITIONAL_MAX_PASS_LEN: usize = 8;
/// Default maximum password length for the MD5 schemes.
pub const DEFAULT_MAX_PASS_LEN: usize = 256;

/// Hashing scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// DES crypt.
    #[default]
    Traditional,
    /// BSD MD5 crypt, `$1$`.
    Md5,
    /// Apache MD5 crypt, `$apr1$`.
    Apr1,
}

impl Scheme {
    /// Select a scheme from a set of mutually exclusive flags.
    ///
    /// Exactly one flag must be set, and the scheme must be compiled into
    /// this build.
    pub fn from_flags(crypt: bool, md5: bool, apr1: bool) -> Result<Scheme> {
	let flags = [(crypt, Scheme::Traditional), (md5, Scheme::Md5), (apr1, Scheme::Apr1)];
	let mut selected = flags.iter().filter(|&&(on, _)| on).map(|&(_, scheme)| scheme);
	match (selected.next(), selected.next()) {
	    (Some(scheme), None) => {
		scheme.ensure_supported()?;
		Ok(scheme)
	    },
	    (None, _) => Err(Error::InvalidSchemeSelection("no scheme selected".to_owned())),
	    (Some(_), Some(_)) => Err(Error::InvalidSchemeSelection("schemes are mutually exclusive".to_owned())),
	}
    }

    /// Returns `true` if the scheme is compiled into this build.
    pub fn is_supported(self) -> bool {
	match self {
	    Scheme::Traditional => cfg!(feature = "des"),
	    Scheme::Md5 | Scheme::Apr1 => cfg!(feature = "md5"),
	}
    }

    /// Fail with `InvalidSchemeSelection` if the scheme is not compiled in.
    pub fn ensure_supported(self) -> Result<()> {
	if self.is_supported() {
	    Ok(())
	} else {
	    Err(Error::InvalidSchemeSelection(format!("{} is not supported by this build", self)))
	}
    }

    /// The magic string between the leading dollar signs, if the scheme has one.
    pub fn magic(self) -> Option<&'static str> {
	match self {
	    Scheme::Traditional => None,
	    Scheme::Md5 => Some("1"),
	    Scheme::Apr1 => Some("apr1"),
	}
    }

    /// Length of a generated salt, which is also the maximum accepted length.
    pub fn salt_len(self) -> usize {
	match self {
	    Scheme::Traditional => salt::TRADITIONAL_SALT_LEN,
	    Scheme::Md5 | Scheme::Apr1 => salt::MD5_MAX_SALT_LEN,
	}
    }

    /// Default maximum password length.
    pub fn max_pass_len(self) -> usize {
	match self {
	    Scheme::Traditional => TRADITIONAL_MAX_PASS_LEN,
	    Scheme::Md5 | Scheme::Apr1 => DEFAULT_MAX_PASS_LEN,
	}
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	let name = match *self {
	    Scheme::Traditional => "crypt",
	    Scheme::Md5 => "md5",
	    Scheme::Apr1 => "apr1",
	};
	f.write_str(name)
    }
}

/// Setup struct for hashing customization.
///
/// If `salt` is `None`, a random salt is generated for every hash. A supplied
/// salt is truncated to the scheme's maximum length and otherwise used as-is.
/// `max_pass_len` overrides the scheme's default password length limit; for
/// DES crypt it can only lower it.
#[derive(Clone, Copy, Debug, Default)]
pub struct HashSetup<'a> {
    /// Hashing scheme.
    pub scheme: Scheme,
    /// Custom salt.
    pub salt: Option<&'a str>,
    /// Suppress the truncation warning.
    pub quiet: bool,
    /// Custom maximum password length.
    pub max_pass_len: Option<usize>,
}

impl<'a> HashSetup<'a> {
    /// Setup with a random salt and default limits.
    pub fn new(scheme: Scheme) -> HashSetup<'a> {
	HashSetup { scheme, ..HashSetup::default() }
    }

    /// The password length limit in effect.
    pub fn max_pass_len(&self) -> usize {
	let dflt = self.scheme.max_pass_len();
	match (self.scheme, self.max_pass_len) {
	    (Scheme::Traditional, Some(len)) => len.min(dflt),
	    (_, Some(len)) => len,
	    (_, None) => dflt,
	}
    }
}

/// Truncate a password to `max_len` bytes.
///
/// Unless `quiet` is set, truncation is reported with a warning-level
/// `tracing` event.
pub fn truncate_password(pass: &[u8], max_len: usize, quiet: bool) -> &[u8] {
    if pass.len() <= max_len {
	return pass;
    }
    if !quiet {
	warn!("truncating password to {} characters", max_len);
    }
    &pass[..max_len]
}

/// Hash a password with a randomly generated salt and default limits.
///
/// An error is returned if the scheme is not compiled in or if the system
/// random number generator fails.
pub fn hash<B: AsRef<[u8]>>(scheme: Scheme, pass: B) -> Result<String> {
    hash_with(&HashSetup::new(scheme), pass)
}

/// Hash a password with user-provided parameters.
pub fn hash_with<B: AsRef<[u8]>>(setup: &HashSetup<'_>, pass: B) -> Result<String> {
    let scheme = setup.scheme;
    scheme.ensure_supported()?;
    let salt = match setup.salt {
	Some(salt) => salt::accept(salt, scheme),
	None => salt::generate(scheme)?,
    };
    let pass = truncate_password(pass.as_ref(), setup.max_pass_len(), setup.quiet);
    compute(scheme, &salt, pass)
}

fn compute(scheme: Scheme, salt: &Salt, pass: &[u8]) -> Result<String> {
    debug!(%scheme, salt_source = ?salt.source(), "computing password hash");
    match scheme {
	#[cfg(feature = "des")]
	Scheme::Traditional => unix_crypt::crypt(pass, salt.as_str()),
	#[cfg(feature = "md5")]
	Scheme::Md5 => Ok(md5_crypt::do_md5_crypt(pass, md5_crypt::MD5_MAGIC, salt.as_str())),
	#[cfg(feature = "md5")]
	Scheme::Apr1 => Ok(md5_crypt::do_md5_crypt(pass, apr1_crypt::APR1_MAGIC, salt.as_str())),
	#[allow(unreachable_patterns)]
	_ => Err(Error::InvalidSchemeSelection(format!("{} is not supported by this build", scheme))),
    }
}
