//! Apache MD5 based hash.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! The format used by Apache `htpasswd` files. It is the BSD
//! [MD5 crypt](crate::md5_crypt) algorithm with the magic string
//! changed from `1` to `apr1`; since the magic string is part of the
//! digest input, the checksums differ as well.
//!
//! # Example
//!
//! ```
//! use pwcrypt::apr1_crypt;
//!
//! assert_eq!(apr1_crypt::hash_with("r31.....", "myPassword"),
//!     "$apr1$r31.....$HqJZimcKQFAMYayBlzkrA/");
//! ```
//!
//! # Parameters
//!
//! Same as for MD5 crypt.
//!
//! # Hash Format
//!
//! The format of the hash is
//! __`$apr1$`__*`{salt}`*__$__*`{checksum}`*.

use super::{Result, Scheme};
use crate::md5_crypt::do_md5_crypt;
use crate::salt;

/// Magic string of the Apache variant.
pub const APR1_MAGIC: &str = "apr1";

/// Hash a password with a randomly generated salt.
///
/// An error is returned if the system random number generator fails.
pub fn hash<B: AsRef<[u8]>>(pass: B) -> Result<String> {
    let salt = salt::generate(Scheme::Apr1)?;
    Ok(do_md5_crypt(pass.as_ref(), APR1_MAGIC, salt.as_str()))
}

/// Hash a password with a user-provided salt.
///
/// If the salt is too long, it is truncated to maximum length.
pub fn hash_with<B: AsRef<[u8]>>(salt: &str, pass: B) -> String {
    let salt = salt::accept(salt, Scheme::Apr1);
    do_md5_crypt(pass.as_ref(), APR1_MAGIC, salt.as_str())
}

#[cfg(test)]
mod tests {
    use crate::md5_crypt;

    #[test]
    fn custom() {
	assert_eq!(super::hash_with("xxxxxxxx", "password"), "$apr1$xxxxxxxx$dxHfLAsjHkDRmG83UXe8K0");
	assert_eq!(super::hash_with("r31.....", "myPassword"), "$apr1$r31.....$HqJZimcKQFAMYayBlzkrA/");
    }

    #[test]
    fn magic_changes_checksum() {
	let apr1 = super::hash_with("xxxxxxxx", "password");
	let md5 = md5_crypt::hash_with("xxxxxxxx", "password");
	assert_ne!(apr1.rsplit('$').next(), md5.rsplit('$').next());
    }

    #[test]
    fn random_salt() {
	let h = super::hash("password").unwrap();
	assert!(h.starts_with("$apr1$"));
	assert_eq!(h.len(), 6 + 8 + 1 + 22);
    }
}
