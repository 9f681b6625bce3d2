//! Hanlift - Chinese text extraction for React/TSX projects
//!
//! Hanlift is a CLI tool and library that finds hardcoded Chinese display text
//! in TSX source files, moves each literal into a shared label-store module
//! under a stable symbolic key, and rewrites the source to reference the store
//! entry. Repeated runs are no-ops, and stores that already exist (including
//! ones imported under a renamed alias) are merged into, never rewritten.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Core extraction engine (scan, key derivation, store merge, rewrite)
//! - `discovery`: Candidate source-file discovery
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod discovery;
pub mod utils;
