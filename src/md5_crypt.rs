//! MD5 based hash.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! This algorithm was developed for FreeBSD to replace the
//! aging DES crypt. It was adopted in various Linux distributions
//! and saw wide use. Presently, it's considered insecure and
//! shouldn't be used for new passwords.
//!
//! The Apache variant in [apr1_crypt](crate::apr1_crypt) runs the very
//! same computation with a different magic string.
//!
//! # Example
//!
//! ```
//! use pwcrypt::md5_crypt;
//!
//! assert_eq!(md5_crypt::hash_with("5pZSV9va", "password"),
//!     "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0");
//! ```
//!
//! # Parameters
//!
//! * __Password length__: unlimited here; [`hash_with`](crate::hash_with)
//!   caps it at 256 by default.
//!
//! * __Salt length__: 0 to 8 bytes. Default is 8 characters.
//!
//! * __Rounds__: 1000 (fixed.)
//!
//! # Hash Format
//!
//! The format of the hash is
//! __`$1$`__*`{salt}`*__$__*`{checksum}`*, where:
//!
//! * *`{salt}`* is the salt string.
//!
//! * *`{checksum}`* is a 22-character Base64 encoding of the checksum.
//!
//! # Memory hygiene
//!
//! Every digest output and the working buffers derived from it are wiped
//! before they are dropped. The `Md5` contexts themselves are not: `md-5`
//! 0.9 offers no way to clear a context, so the password bytes buffered
//! inside one are released without being overwritten.

use md5::{Md5, Digest};
use zeroize::{Zeroize, Zeroizing};
use super::{Result, Scheme};
use crate::enc_dec::md5_hash64_encode;
use crate::salt::{self, truncate_salt};

/// Maximium salt length.
pub const MAX_SALT_LEN: usize = salt::MD5_MAX_SALT_LEN;
/// Magic string of the BSD variant.
pub const MD5_MAGIC: &str = "1";
const ROUNDS: usize = 1000;
const DIGEST_LEN: usize = 16;

fn finalize_into(dgst: Md5, buf: &mut [u8; DIGEST_LEN]) {
    let mut out = dgst.finalize();
    buf.copy_from_slice(&out);
    out[..].zeroize();
}

pub(crate) fn do_md5_crypt(pass: &[u8], magic: &str, salt: &str) -> String {
    let salt = truncate_salt(salt, MAX_SALT_LEN);

    let mut dgst_a = Md5::new();
    dgst_a.update(pass);
    dgst_a.update(b"$");
    dgst_a.update(magic.as_bytes());
    dgst_a.update(b"$");
    dgst_a.update(salt.as_bytes());

    let mut dgst_b = Md5::new();
    dgst_b.update(pass);
    dgst_b.update(salt.as_bytes());
    dgst_b.update(pass);
    let mut hash_b = Zeroizing::new([0u8; DIGEST_LEN]);
    finalize_into(dgst_b, &mut hash_b);

    let plen = pass.len();
    for _ in 0..plen / DIGEST_LEN {
	dgst_a.update(&hash_b[..]);
    }
    dgst_a.update(&hash_b[..plen % DIGEST_LEN]);

    // One byte per bit of the length, LSB first: NUL for a set bit,
    // the first password byte for a clear one.
    let nbits = usize::BITS - plen.leading_zeros();
    for bit in 0..nbits {
	if (plen >> bit) & 1 == 1 {
	    dgst_a.update([0u8]);
	} else {
	    dgst_a.update(&pass[..1]);
	}
    }

    let mut buf = Zeroizing::new([0u8; DIGEST_LEN]);
    finalize_into(dgst_a, &mut buf);

    for r in 0..ROUNDS {
	let mut dgst_c = Md5::new();
	if r % 2 == 1 {
	    dgst_c.update(pass);
	} else {
	    dgst_c.update(&buf[..]);
	}
	if r % 3 != 0 {
	    dgst_c.update(salt.as_bytes());
	}
	if r % 7 != 0 {
	    dgst_c.update(pass);
	}
	if r % 2 == 1 {
	    dgst_c.update(&buf[..]);
	} else {
	    dgst_c.update(pass);
	}
	finalize_into(dgst_c, &mut buf);
    }

    let mut perm = Zeroizing::new([0u8; DIGEST_LEN]);
    let mut source = 0;
    for dest in 0..14 {
	perm[dest] = buf[source];
	source = (source + 6) % 17;
    }
    perm[14] = buf[5];
    perm[15] = buf[11];

    format!("${}${}${}", magic, salt, md5_hash64_encode(&perm))
}

/// Hash a password with a randomly generated salt.
///
/// An error is returned if the system random number generator fails.
pub fn hash<B: AsRef<[u8]>>(pass: B) -> Result<String> {
    let salt = salt::generate(Scheme::Md5)?;
    Ok(do_md5_crypt(pass.as_ref(), MD5_MAGIC, salt.as_str()))
}

/// Hash a password with a user-provided salt.
///
/// If the salt is too long, it is truncated to maximum length. Its
/// characters are used as given, even if they're outside the crypt alphabet.
pub fn hash_with<B: AsRef<[u8]>>(salt: &str, pass: B) -> String {
    let salt = salt::accept(salt, Scheme::Md5);
    do_md5_crypt(pass.as_ref(), MD5_MAGIC, salt.as_str())
}
