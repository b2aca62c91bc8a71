// Copyright 2025 Irreducible Inc.

//! Implementations of the RustCrypto [`digest`] traits.

use digest::{
	HashMarker, InvalidBufferSize, InvalidOutputSize, Reset, Update, VariableOutput,
	VariableOutputReset,
};

use crate::{consts::DIGEST_LENGTH, Blake2s, Config, Error};

/// [`Blake2s`] behind the [`VariableOutput`] interface.
///
/// Finalizing consumes or resets the hasher, so unlike [`Blake2s`] it never has to reject input.
#[derive(Debug, Clone)]
pub struct Blake2sVar {
	inner: Blake2s,
}

impl Blake2sVar {
	/// Creates a hasher with a key, salt or personalization.
	pub fn with_config(output_size: usize, config: &Config) -> Result<Self, Error> {
		Blake2s::with_config(output_size, config).map(|inner| Self { inner })
	}

	fn write_output(&mut self, out: &mut [u8]) -> Result<(), InvalidBufferSize> {
		if out.len() != self.inner.digest_length() {
			return Err(InvalidBufferSize);
		}
		out.copy_from_slice(self.inner.digest());
		Ok(())
	}
}

impl HashMarker for Blake2sVar {}

impl Update for Blake2sVar {
	#[inline]
	fn update(&mut self, data: &[u8]) {
		self.inner.absorb(data);
	}
}

impl VariableOutput for Blake2sVar {
	const MAX_OUTPUT_SIZE: usize = DIGEST_LENGTH;

	fn new(output_size: usize) -> Result<Self, InvalidOutputSize> {
		Blake2s::new(output_size)
			.map(|inner| Self { inner })
			.map_err(|_| InvalidOutputSize)
	}

	fn output_size(&self) -> usize {
		self.inner.digest_length()
	}

	fn finalize_variable(mut self, out: &mut [u8]) -> Result<(), InvalidBufferSize> {
		self.write_output(out)
	}
}

impl Reset for Blake2sVar {
	fn reset(&mut self) {
		self.inner.reset();
	}
}

impl VariableOutputReset for Blake2sVar {
	fn finalize_variable_reset(&mut self, out: &mut [u8]) -> Result<(), InvalidBufferSize> {
		self.write_output(out)?;
		self.inner.reset();
		Ok(())
	}
}
