// Copyright 2025 Irreducible Inc.

//! Incremental BLAKE2s hashing.

use std::{fmt, io};

use blake2s_utils::ensure;
use tracing::{debug, instrument, trace};

use crate::{
	compression::{compress, counter_words, Block, ChainValue, LAST_BLOCK, NO_FLAGS},
	consts::{BLOCK_LENGTH, DIGEST_LENGTH},
	params::{Config, Input, ParameterBlock},
	Error,
};

/// Lowest-level hasher state: chaining value, pending input and byte counter.
#[derive(Clone)]
pub(crate) struct HashCore {
	chain: ChainValue,
	buffer: Block,
	/// Valid bytes in `buffer`. Reaches [`BLOCK_LENGTH`] when a full block is held back.
	buffer_len: usize,
	/// Bytes compressed so far; pending bytes in `buffer` are not counted.
	counter: u64,
}

impl HashCore {
	fn new(params: &ParameterBlock, key_block: Option<&Block>) -> Self {
		let mut core = Self {
			chain: params.initial_chain(),
			buffer: [0; BLOCK_LENGTH],
			buffer_len: 0,
			counter: 0,
		};
		// The key block is hashed as ordinary data by the next update or finalize.
		if let Some(key_block) = key_block {
			core.buffer = *key_block;
			core.buffer_len = BLOCK_LENGTH;
		}
		core
	}

	fn compress_buffer(&mut self, len: usize, flags: [u32; 2]) {
		self.counter = self.counter.wrapping_add(len as u64);
		self.chain = compress(&self.chain, &self.buffer, counter_words(self.counter), flags);
	}

	/// Absorbs `input`, compressing every full block except the last one.
	///
	/// A trailing full block stays in the buffer, since only finalization knows whether it is the
	/// last block of the message.
	pub(crate) fn update(&mut self, mut input: &[u8]) {
		if input.is_empty() {
			return;
		}

		let left = BLOCK_LENGTH - self.buffer_len;
		if input.len() > left {
			let (head, rest) = input.split_at(left);
			self.buffer[self.buffer_len..].copy_from_slice(head);
			self.compress_buffer(BLOCK_LENGTH, NO_FLAGS);
			self.buffer_len = 0;
			input = rest;
		}

		while input.len() > BLOCK_LENGTH {
			let (block, rest) = input.split_at(BLOCK_LENGTH);
			self.buffer.copy_from_slice(block);
			self.compress_buffer(BLOCK_LENGTH, NO_FLAGS);
			input = rest;
		}

		self.buffer[self.buffer_len..self.buffer_len + input.len()].copy_from_slice(input);
		self.buffer_len += input.len();
	}

	/// Compresses the zero-padded remainder as the last block and serializes the chaining value.
	pub(crate) fn finalize(&mut self) -> [u8; DIGEST_LENGTH] {
		self.buffer[self.buffer_len..].fill(0);
		self.compress_buffer(self.buffer_len, LAST_BLOCK);
		self.buffer_len = 0;
		trace!(bytes = self.counter, "blake2s finalized");

		let mut out = [0u8; DIGEST_LENGTH];
		for (chunk, word) in out.chunks_exact_mut(4).zip(self.chain) {
			chunk.copy_from_slice(&word.to_le_bytes());
		}
		out
	}
}

/// BLAKE2s hasher with a digest length of 1 to 32 bytes and an optional key, salt and
/// personalization.
///
/// Feed data with [`Blake2s::update`] and read the result with [`Blake2s::digest`]. The first
/// call to `digest` finalizes the hasher: the result is cached and returned by every later call,
/// and further updates fail with [`Error::UpdateAfterFinalize`] until [`Blake2s::reset`].
///
/// ```
/// use blake2s_hash::Blake2s;
///
/// let mut hasher = Blake2s::new(32).unwrap();
/// hasher.update(b"ab").unwrap().update(b"c").unwrap();
/// assert_eq!(
/// 	hasher.hex_digest(),
/// 	"508c5e8c327c14e2e1a72ba34eeb452f37458b209ed63a294d999b4c86675982"
/// );
/// ```
#[derive(Clone)]
pub struct Blake2s {
	core: HashCore,
	params: ParameterBlock,
	key_block: Option<Block>,
	result: Option<[u8; DIGEST_LENGTH]>,
}

impl Blake2s {
	/// Creates an unkeyed hasher producing `digest_length` bytes.
	pub fn new(digest_length: usize) -> Result<Self, Error> {
		Self::with_config(digest_length, &Config::default())
	}

	/// Creates a keyed hasher. An empty key is the same as no key.
	pub fn new_keyed(digest_length: usize, key: &[u8]) -> Result<Self, Error> {
		Self::with_config(digest_length, &Config::new().key(key))
	}

	/// Creates a hasher from an explicit configuration, validating every field before any state
	/// is built.
	pub fn with_config(digest_length: usize, config: &Config) -> Result<Self, Error> {
		let params = ParameterBlock::new(digest_length, config)?;

		let key_block = config
			.key
			.as_deref()
			.filter(|key| !key.is_empty())
			.map(|key| {
				let mut block = [0u8; BLOCK_LENGTH];
				block[..key.len()].copy_from_slice(key);
				block
			});

		trace!(
			digest_length,
			key_length = params.key_length(),
			salt = config.salt.is_some(),
			personalization = config.personalization.is_some(),
			"blake2s initialized"
		);

		Ok(Self {
			core: HashCore::new(&params, key_block.as_ref()),
			params,
			key_block,
			result: None,
		})
	}

	/// The number of bytes [`Blake2s::digest`] returns.
	pub fn digest_length(&self) -> usize {
		self.params.digest_length()
	}

	/// Whether the hasher has been finalized by [`Blake2s::digest`].
	pub fn is_finished(&self) -> bool {
		self.result.is_some()
	}

	/// Absorbs `data`. Returns the hasher so calls can be chained.
	pub fn update(&mut self, data: &[u8]) -> Result<&mut Self, Error> {
		if self.is_finished() {
			debug!(len = data.len(), "blake2s update rejected after finalization");
			return Err(Error::UpdateAfterFinalize);
		}
		self.core.update(data);
		Ok(self)
	}

	/// Absorbs `length` bytes of `data` starting at `offset`.
	///
	/// The range is checked before anything is absorbed.
	pub fn update_range(
		&mut self,
		data: &[u8],
		offset: usize,
		length: usize,
	) -> Result<&mut Self, Error> {
		let range_error = Error::InvalidInputRange {
			offset,
			length,
			available: data.len(),
		};
		let end = offset.checked_add(length).ok_or_else(|| range_error.clone())?;
		ensure!(end <= data.len(), range_error);
		self.update(&data[offset..end])
	}

	/// Absorbs a loosely typed input, rejecting text with [`Error::InvalidInputType`].
	pub fn update_input<'a>(&mut self, input: impl Into<Input<'a>>) -> Result<&mut Self, Error> {
		let data = input.into().as_bytes()?;
		self.update(data)
	}

	/// Finalizes the hasher on the first call and returns the `digest_length`-byte digest.
	pub fn digest(&mut self) -> &[u8] {
		let out = self.result.get_or_insert_with(|| self.core.finalize());
		&out[..self.params.digest_length()]
	}

	/// The digest as lowercase hex, two characters per byte.
	pub fn hex_digest(&mut self) -> String {
		to_hex(self.digest())
	}

	/// Returns the hasher to its freshly constructed state, keeping its configuration.
	pub fn reset(&mut self) {
		self.core = HashCore::new(&self.params, self.key_block.as_ref());
		self.result = None;
	}

	/// Absorbs `data` without checking for finalization; the caller guarantees the hasher is
	/// not finished.
	pub(crate) fn absorb(&mut self, data: &[u8]) {
		debug_assert!(!self.is_finished());
		self.core.update(data);
	}
}

impl Default for Blake2s {
	fn default() -> Self {
		Self {
			core: HashCore::new(&ParameterBlock::DEFAULT, None),
			params: ParameterBlock::DEFAULT,
			key_block: None,
			result: None,
		}
	}
}

impl fmt::Debug for Blake2s {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Blake2s")
			.field("digest_length", &self.digest_length())
			.field("keyed", &self.key_block.is_some())
			.field("finished", &self.is_finished())
			.finish_non_exhaustive()
	}
}

impl io::Write for Blake2s {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.update(buf).map_err(io::Error::other)?;
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// Hashes `data` in one call.
#[instrument(skip(data), level = "trace")]
pub fn blake2s(digest_length: usize, data: &[u8]) -> Result<Vec<u8>, Error> {
	Ok(Blake2s::new(digest_length)?.update(data)?.digest().to_vec())
}

/// Hashes `data` with `key` in one call.
#[instrument(skip(key, data), level = "trace")]
pub fn blake2s_keyed(digest_length: usize, key: &[u8], data: &[u8]) -> Result<Vec<u8>, Error> {
	Ok(Blake2s::new_keyed(digest_length, key)?
		.update(data)?
		.digest()
		.to_vec())
}

fn to_hex(bytes: &[u8]) -> String {
	const HEX: &[u8; 16] = b"0123456789abcdef";

	let mut out = String::with_capacity(2 * bytes.len());
	for &byte in bytes {
		out.push(HEX[(byte >> 4) as usize] as char);
		out.push(HEX[(byte & 0xf) as usize] as char);
	}
	out
}
