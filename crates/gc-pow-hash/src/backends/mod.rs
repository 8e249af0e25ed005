//! Hash backends
//!
//! The portable backend is always compiled. The parallel backend is feature
//! gated and falls back to portable when only one core is available.

pub mod portable;

#[cfg(feature = "parallel")]
pub mod parallel;
