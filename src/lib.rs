//! Pixel Pong (workspace facade crate).
//!
//! Re-exports the member crates as `pixel_pong::{core,engine,input,term,types}`
//! while the implementation lives in dedicated crates under `crates/`.

pub use pixel_pong_core as core;
pub use pixel_pong_engine as engine;
pub use pixel_pong_input as input;
pub use pixel_pong_term as term;
pub use pixel_pong_types as types;
