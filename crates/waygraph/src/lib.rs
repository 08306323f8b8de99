//! Waygraph - load weighted digraphs from documents and query them.
//!
//! This crate provides the `waygraph` CLI and the pieces it is built from:
//! graph documents and their validation, record storage backends, and the
//! repository configuration. The graph algorithms live in `waygraph-core`.

#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod output;
pub mod storage;

pub use error::{Error, Result};
