//! Block puzzle (workspace facade crate).
//!
//! This package exposes `block_puzzle::{core,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use block_puzzle_core as core;
pub use block_puzzle_types as types;
