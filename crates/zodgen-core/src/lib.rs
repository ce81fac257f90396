//! Core types, the zod expression tree, and configuration for zodgen.
//!
//! This crate provides the foundational data structures used across all zodgen crates:
//! - [`types`]: Declaration candidates, resolved statements, and import sets
//! - [`ast`]: The renderable zod expression tree ([`Statement`](ast::Statement), [`Expr`](ast::Expr))
//! - [`naming`]: Validator naming functions (`getSchemaName` equivalents)
//! - [`config`]: Configuration loading from `zodgen.config.json`
//! - [`hash`]: Deterministic content hashing (base62 of xxhash64)

pub mod ast;
pub mod config;
pub mod hash;
pub mod naming;
pub mod types;
