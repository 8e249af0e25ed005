//! Cross-crate scenarios

mod pow_parity;
mod retarget_flows;
