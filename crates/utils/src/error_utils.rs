// Copyright 2024-2025 Irreducible Inc.

//! Early-return helpers for validation code.
//!
//! With the `bail_panic` feature enabled, [`bail!`] panics instead of returning, which makes the
//! failing call site show up in a backtrace.

#[cfg(feature = "bail_panic")]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		panic!("{}", $err);
	};
}

#[cfg(not(feature = "bail_panic"))]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		return Err($err.into());
	};
}

/// Returns `Err($err)` from the enclosing function unless `$cond` holds.
#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}
