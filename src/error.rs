//! Error values.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! Hashing itself cannot fail once a scheme and a salt are settled. The
//! failures are all in the setup: obtaining entropy for a salt, choosing a
//! scheme, and handing the DES primitive a salt it can use. Password
//! truncation is not an error; it's reported through a `tracing` warning.
use thiserror::Error;

/// Possible errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The random source could not supply salt bytes.
    #[error("random source unavailable: {0}")]
    RandomSourceUnavailable(String),
    /// No scheme, more than one scheme, or a scheme not compiled into this
    /// build was selected.
    #[error("invalid scheme selection: {0}")]
    InvalidSchemeSelection(String),
    /// The salt is shorter than two bytes for DES crypt, or has a NUL or
    /// non-ASCII byte where DES crypt reads it.
    #[error("salt cannot be used with traditional crypt")]
    InvalidSalt,
}
