// Copyright 2025 Irreducible Inc.

use crate::consts::{DIGEST_LENGTH, KEY_LENGTH, PERSONALIZATION_LENGTH, SALT_LENGTH};

/// Error returned when constructing or feeding a hasher fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("digest length {length} is out of range 1..={}", DIGEST_LENGTH)]
	InvalidDigestLength { length: usize },
	#[error("key length {length} exceeds the maximum of {} bytes", KEY_LENGTH)]
	InvalidKeyLength { length: usize },
	#[error("salt must be {} bytes, got {length}", SALT_LENGTH)]
	InvalidSaltLength { length: usize },
	#[error("personalization must be {} bytes, got {length}", PERSONALIZATION_LENGTH)]
	InvalidPersonalizationLength { length: usize },
	#[error("unexpected key in config: {0}")]
	UnexpectedConfigField(String),
	/// Thrown for textual input where a byte sequence is expected.
	#[error("input must be a byte sequence, not text")]
	InvalidInputType,
	#[error("range {offset}..{offset}+{length} is out of bounds for input of {available} bytes")]
	InvalidInputRange {
		offset: usize,
		length: usize,
		available: usize,
	},
	#[error("update() after calling digest()")]
	UpdateAfterFinalize,
}
