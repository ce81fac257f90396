//! TypeScript front end for zodgen.
//!
//! - [`treesitter`] parses source text and extracts top-level declarations.
//! - [`typescript`] compiles one declaration into a zod validator candidate.
//! - [`jsdoc`] reads validation tags from JSDoc comments.

pub mod jsdoc;
pub mod queries;
pub mod treesitter;
pub mod typescript;
