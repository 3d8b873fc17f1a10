//! Ordered resolution passes over the host registry
//!
//! Each pass either takes the registry by value and returns it
//! (fragment-chain resolution) or reads it immutably (validation). A pass
//! runs to completion for every host before the next pass starts, because
//! later passes read what earlier passes wrote.

pub mod fragments;
pub mod validate;

pub use fragments::resolve_fragment_chains;
pub use validate::validate_hosts;
