// Copyright 2025 Irreducible Inc.

//! Incremental [BLAKE2s](https://www.rfc-editor.org/rfc/rfc7693) with digests of 1 to 32 bytes,
//! optional keying, salt and personalization.

pub mod compression;
pub mod consts;
mod error;
mod hasher;
pub mod params;
mod var_digest;


pub use consts::*;
pub use digest;
pub use error::Error;
pub use hasher::*;
pub use params::{Config, Input};
pub use var_digest::Blake2sVar;
