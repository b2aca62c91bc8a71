// Copyright 2025 Irreducible Inc.

//! Hasher configuration and the BLAKE2s parameter block.

use std::fmt;

use blake2s_utils::{checked_arithmetics::checked_u8, ensure};

use crate::{
	compression::ChainValue,
	consts::{DIGEST_LENGTH, IV, KEY_LENGTH, PERSONALIZATION_LENGTH, SALT_LENGTH},
	Error,
};

/// A loosely typed input value, for callers that receive data without knowing its kind up front.
///
/// Only [`Input::Bytes`] is accepted anywhere a byte sequence is expected; [`Input::Text`] is
/// rejected with [`Error::InvalidInputType`] instead of being silently encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
	Bytes(&'a [u8]),
	Text(&'a str),
}

impl<'a> Input<'a> {
	pub fn as_bytes(self) -> Result<&'a [u8], Error> {
		match self {
			Input::Bytes(bytes) => Ok(bytes),
			Input::Text(_) => Err(Error::InvalidInputType),
		}
	}
}

impl<'a> From<&'a [u8]> for Input<'a> {
	fn from(bytes: &'a [u8]) -> Self {
		Input::Bytes(bytes)
	}
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
	fn from(bytes: &'a [u8; N]) -> Self {
		Input::Bytes(bytes)
	}
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
	fn from(bytes: &'a Vec<u8>) -> Self {
		Input::Bytes(bytes)
	}
}

impl<'a> From<&'a str> for Input<'a> {
	fn from(text: &'a str) -> Self {
		Input::Text(text)
	}
}

/// Optional key, salt and personalization of a hasher.
///
/// Lengths are not checked here but when a hasher is built from the config.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(deny_unknown_fields)
)]
pub struct Config {
	pub key: Option<Vec<u8>>,
	pub salt: Option<Vec<u8>>,
	pub personalization: Option<Vec<u8>>,
}

impl Config {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn key(mut self, key: impl Into<Vec<u8>>) -> Self {
		self.key = Some(key.into());
		self
	}

	pub fn salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
		self.salt = Some(salt.into());
		self
	}

	pub fn personalization(mut self, personalization: impl Into<Vec<u8>>) -> Self {
		self.personalization = Some(personalization.into());
		self
	}

	/// Builds a config from named fields.
	///
	/// The recognized names are `key`, `salt` and `personalization`. Any other name fails with
	/// [`Error::UnexpectedConfigField`], and a text value with [`Error::InvalidInputType`].
	pub fn from_fields<'a, I, V>(fields: I) -> Result<Self, Error>
	where
		I: IntoIterator<Item = (&'a str, V)>,
		V: Into<Input<'a>>,
	{
		let mut config = Self::default();
		for (name, value) in fields {
			let slot = match name {
				"key" => &mut config.key,
				"salt" => &mut config.salt,
				"personalization" => &mut config.personalization,
				other => return Err(Error::UnexpectedConfigField(other.to_owned())),
			};
			*slot = Some(value.into().as_bytes()?.to_vec());
		}
		Ok(config)
	}
}

impl fmt::Debug for Config {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Config")
			.field("key", &self.key.as_ref().map(|key| format!("<{} bytes>", key.len())))
			.field("salt", &self.salt)
			.field("personalization", &self.personalization)
			.finish()
	}
}

/// The validated parameters that seed the initial chaining value.
///
/// Tree hashing fields are fixed to sequential mode: fanout and depth 1, everything else zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterBlock {
	digest_length: u8,
	key_length: u8,
	salt: [u8; SALT_LENGTH],
	personalization: [u8; PERSONALIZATION_LENGTH],
}

impl ParameterBlock {
	const FANOUT: u8 = 1;
	const DEPTH: u8 = 1;

	/// Unkeyed, full-length digest without salt or personalization.
	pub const DEFAULT: Self = Self {
		digest_length: checked_u8(DIGEST_LENGTH),
		key_length: 0,
		salt: [0; SALT_LENGTH],
		personalization: [0; PERSONALIZATION_LENGTH],
	};

	pub fn new(digest_length: usize, config: &Config) -> Result<Self, Error> {
		ensure!(
			(1..=DIGEST_LENGTH).contains(&digest_length),
			Error::InvalidDigestLength {
				length: digest_length
			}
		);

		let key_length = config.key.as_ref().map_or(0, Vec::len);
		ensure!(key_length <= KEY_LENGTH, Error::InvalidKeyLength { length: key_length });

		let salt = match &config.salt {
			Some(salt) => <[u8; SALT_LENGTH]>::try_from(salt.as_slice())
				.map_err(|_| Error::InvalidSaltLength { length: salt.len() })?,
			None => [0; SALT_LENGTH],
		};
		let personalization = match &config.personalization {
			Some(personalization) => {
				<[u8; PERSONALIZATION_LENGTH]>::try_from(personalization.as_slice()).map_err(
					|_| Error::InvalidPersonalizationLength {
						length: personalization.len(),
					},
				)?
			}
			None => [0; PERSONALIZATION_LENGTH],
		};

		Ok(Self {
			digest_length: checked_u8(digest_length),
			key_length: checked_u8(key_length),
			salt,
			personalization,
		})
	}

	pub fn digest_length(&self) -> usize {
		self.digest_length as usize
	}

	pub fn key_length(&self) -> usize {
		self.key_length as usize
	}

	/// IV XOR the encoded parameter block.
	///
	/// An absent salt or personalization encodes as zeros, leaving those IV words unchanged.
	pub fn initial_chain(&self) -> ChainValue {
		let mut chain = IV;
		chain[0] ^= u32::from_le_bytes([
			self.digest_length,
			self.key_length,
			Self::FANOUT,
			Self::DEPTH,
		]);
		for (h, chunk) in chain[4..6].iter_mut().zip(self.salt.chunks_exact(4)) {
			*h ^= u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
		}
		for (h, chunk) in chain[6..8]
			.iter_mut()
			.zip(self.personalization.chunks_exact(4))
		{
			*h ^= u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
		}
		chain
	}
}
