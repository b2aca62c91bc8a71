// Copyright 2024 Irreducible Inc.

pub mod checked_arithmetics;
pub mod error_utils;
pub mod tracing;
