//! Atomic primitives, swappable for loom's models.
//!
//! Everything in the crate goes through these aliases so that building with
//! `RUSTFLAGS="--cfg loom"` (see `cargo xtask loom`) substitutes loom's
//! model-checked atomics for the real ones.

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize};

#[cfg(not(loom))]
pub(crate) use core::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize};

pub(crate) use core::sync::atomic::Ordering;
