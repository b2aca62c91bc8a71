// Copyright 2023 Irreducible Inc.

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs the subscriber.
pub fn init_tracing() {
	use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

	let _ = tracing_subscriber::registry()
		.with(EnvFilter::from_default_env())
		.with(fmt::layer())
		.try_init();
}
