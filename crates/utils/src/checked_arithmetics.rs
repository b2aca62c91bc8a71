// Copyright 2024 Irreducible Inc.

/// Division implementation that fails in case when `a` isn't divisible by `b`.
///
/// Being `const`, a bad pair of sizes fails compilation when used to define a constant.
pub const fn checked_int_div(a: usize, b: usize) -> usize {
	let result = a / b;
	assert!(b * result == a);

	result
}

/// Converts a length to the `u8` used in encoded parameter fields, failing if it doesn't fit.
pub const fn checked_u8(val: usize) -> u8 {
	assert!(val <= u8::MAX as usize);

	val as u8
}
