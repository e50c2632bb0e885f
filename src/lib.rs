//! depfix - Dependency manifest updater library
//!
//! This library provides the version resolution engine and the pieces around
//! it:
//! - PyPI metadata fetching with caching and bounded concurrency
//! - `Requires-Python` compatibility filtering
//! - PEP 440 constraint evaluation and delta classification
//! - requirements.txt parsing, rewriting and report formatting

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod resolver;
