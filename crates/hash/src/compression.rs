// Copyright 2025 Irreducible Inc.

//! The BLAKE2s compression function.

use blake2s_utils::checked_arithmetics::checked_int_div;

use crate::consts::{BLOCK_LENGTH, IV, SIGMA};

const BLOCK_WORDS: usize = checked_int_div(BLOCK_LENGTH, 4);

/// The running hash state carried between compressions.
pub type ChainValue = [u32; 8];

/// One message block.
pub type Block = [u8; BLOCK_LENGTH];

/// Finalization flag words for a block that is not the last one.
pub const NO_FLAGS: [u32; 2] = [0, 0];

/// Finalization flag words for the last block of a sequential (non-tree) hash.
pub const LAST_BLOCK: [u32; 2] = [u32::MAX, 0];

#[inline(always)]
fn g(v: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize, x: u32, y: u32) {
	v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
	v[d] = (v[d] ^ v[a]).rotate_right(16);
	v[c] = v[c].wrapping_add(v[d]);
	v[b] = (v[b] ^ v[c]).rotate_right(12);
	v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
	v[d] = (v[d] ^ v[a]).rotate_right(8);
	v[c] = v[c].wrapping_add(v[d]);
	v[b] = (v[b] ^ v[c]).rotate_right(7);
}

#[inline(always)]
fn round(v: &mut [u32; 16], m: &[u32; BLOCK_WORDS], s: &[usize; 16]) {
	// columns
	g(v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
	g(v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
	g(v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
	g(v, 3, 7, 11, 15, m[s[6]], m[s[7]]);
	// diagonals
	g(v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
	g(v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
	g(v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
	g(v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
}

fn load_words(block: &Block) -> [u32; BLOCK_WORDS] {
	let mut m = [0u32; BLOCK_WORDS];
	for (word, chunk) in m.iter_mut().zip(block.chunks_exact(4)) {
		*word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
	}
	m
}

/// Compresses one message block into the chaining value.
///
/// `counter` is the little-endian pair of words of the total number of bytes hashed so far,
/// including this block. `flags` is [`NO_FLAGS`] for every block but the last, which uses
/// [`LAST_BLOCK`].
pub fn compress(chain: &ChainValue, block: &Block, counter: [u32; 2], flags: [u32; 2]) -> ChainValue {
	let m = load_words(block);

	let mut v = [0u32; 16];
	v[..8].copy_from_slice(chain);
	v[8..].copy_from_slice(&IV);
	v[12] ^= counter[0];
	v[13] ^= counter[1];
	v[14] ^= flags[0];
	v[15] ^= flags[1];

	for s in &SIGMA {
		round(&mut v, &m, s);
	}

	let mut out = *chain;
	for (i, h) in out.iter_mut().enumerate() {
		*h ^= v[i] ^ v[i + 8];
	}
	out
}

/// Splits a 64-bit byte count into the low and high counter words.
#[inline]
pub fn counter_words(count: u64) -> [u32; 2] {
	[count as u32, (count >> 32) as u32]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_g_mixes_all_four_words() {
		let mut v = [0u32; 16];
		g(&mut v, 0, 4, 8, 12, 1, 0);
		assert_ne!(v[0], 0);
		assert_ne!(v[4], 0);
		assert_ne!(v[8], 0);
		assert_ne!(v[12], 0);
		assert!(v.iter().enumerate().all(|(i, &w)| i % 4 == 0 || w == 0));
	}

	#[test]
	fn test_counter_words() {
		assert_eq!(counter_words(0), [0, 0]);
		assert_eq!(counter_words(64), [64, 0]);
		assert_eq!(counter_words(1 << 32), [0, 1]);
		assert_eq!(counter_words(u64::MAX), [u32::MAX, u32::MAX]);
	}

	#[test]
	fn test_compress_abc_single_block() {
		// Unkeyed, 32-byte digest: h[0] = IV[0] ^ 0x01010020.
		let mut chain = IV;
		chain[0] ^= 0x01010020;

		let mut block = [0u8; BLOCK_LENGTH];
		block[..3].copy_from_slice(b"abc");

		let out = compress(&chain, &block, counter_words(3), LAST_BLOCK);
		assert_eq!(
			out,
			[
				0x8c5e8c50, 0xe2147c32, 0xa32ba7e1, 0x2f45eb4e, 0x208b4537, 0x293ad69e, 0x4c9b994d,
				0x82596786,
			]
		);
	}

	#[test]
	fn test_compress_depends_on_counter_and_flags() {
		let chain = IV;
		let block = [0x5au8; BLOCK_LENGTH];

		let base = compress(&chain, &block, counter_words(64), NO_FLAGS);
		assert_ne!(base, compress(&chain, &block, counter_words(65), NO_FLAGS));
		assert_ne!(base, compress(&chain, &block, counter_words(64 + (1 << 32)), NO_FLAGS));
		assert_ne!(base, compress(&chain, &block, counter_words(64), LAST_BLOCK));
		assert_ne!(base, compress(&chain, &block, counter_words(64), [0, u32::MAX]));
	}
}
