//! Declaration ordering for zodgen.
//!
//! Turns per-declaration validator candidates into an emission order:
//! - [`resolver`]: bounded fixed-point placement of candidates whose dependencies are placed
//! - [`cycle`]: rewrites direct self-references into deferred `z.lazy` form
//! - [`diagnostics`]: explains why candidates were left unresolved
//! - [`engine`]: source text in, [`Generation`](engine::Generation) out

pub mod cycle;
pub mod diagnostics;
pub mod engine;
pub mod resolver;
pub mod types;
