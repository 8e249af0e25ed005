//! Hexagonal ports
//!
//! The engine drives a single outbound port: a read-only point lookup of
//! stored ancestors.

pub mod outbound;

pub use outbound::AncestorLookup;
