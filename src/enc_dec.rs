// Encoding routines.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.

/// The crypt(3) alphabet. A value's index is its low six bits.
pub const CRYPT_HASH64: &[u8] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of an encoded MD5 checksum.
#[cfg_attr(not(feature = "md5"), allow(dead_code))]
pub const MD5_HASH64_LEN: usize = 22;

pub fn encode6(val: u8) -> char {
    CRYPT_HASH64[(val & 0x3F) as usize] as char
}

pub fn is_hash64(c: char) -> bool {
    c.is_ascii() && CRYPT_HASH64.contains(&(c as u8))
}

/// Six-bit value DES crypt draws from a salt byte.
///
/// Alphabet characters map to their index. Other printable ASCII bytes
/// map onto whatever slot the traditional crypt lookup gives them, so a
/// salt like `!!` still hashes. NUL and non-ASCII bytes have no slot.
#[cfg_attr(not(feature = "des"), allow(dead_code))]
pub fn des_salt_value(b: u8) -> Option<u8> {
    match b {
	0 | 0x80..=0xFF => None,
	0x01..=0x39 => Some(b.wrapping_sub(b'.') & 0x3F),
	0x3A..=0x5A => Some((b - 0x35) & 0x3F),
	_ => Some((b - 0x3B) & 0x3F),
    }
}

// Five 3-byte groups give 20 characters, the last byte gives two more.
#[cfg_attr(not(feature = "md5"), allow(dead_code))]
pub fn md5_hash64_encode(bs: &[u8; 16]) -> String {
    let mut out = String::with_capacity(MD5_HASH64_LEN);
    for g in bs[..15].chunks_exact(3) {
	let (x0, x1, x2) = (g[0], g[1], g[2]);
	out.push(encode6(x2));
	out.push(encode6(((x1 & 0x0F) << 2) | (x2 >> 6)));
	out.push(encode6(((x0 & 0x03) << 4) | (x1 >> 4)));
	out.push(encode6(x0 >> 2));
    }
    out.push(encode6(bs[15]));
    out.push(encode6(bs[15] >> 6));
    out
}
