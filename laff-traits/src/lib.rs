//! Shared traits for the laff crates.
//!
//! This crate provides the element-type bound used by `laff-view`,
//! `laff-kernel` and the partition algorithms in `laff`. Downstream crates
//! can depend on `laff-traits` alone to implement [`Scalar`] for their own
//! types without orphan rule violations.

pub mod scalar;

pub use scalar::Scalar;
