#![forbid(unsafe_code)]
//! Placeholder-safe translator for ordered JSON message catalogs.
//!
//! Converts hierarchical localization message files from one language to
//! another while preserving exact structural fidelity: key order, value
//! shape, and literal numeric formatting all survive the round trip, and
//! in-text `__placeholder__` tokens survive the translation.
//!
//! # Quick Start
//!
//! ```rust
//! use msgtrans::{catalog, pipeline, EchoTranslator};
//!
//! let source = catalog::parse(r#"{"app": {"title": "Hello __name__"}}"#)?;
//! let (target, count) = pipeline::translate_document(&source, "nl", &EchoTranslator, None)?;
//! assert_eq!(count, 1);
//! println!("{}", catalog::serialize_pretty(&target));
//! # Ok::<(), msgtrans::Error>(())
//! ```
//!
//! # Pipeline
//!
//! bytes → [`lexer`] tokens → [`types::Document`] → [`pipeline`] (one
//! blocking [`translator::Translator`] call per string, then
//! [`placeholder`] restoration and [`entity`] normalization) →
//! [`catalog::serialize_pretty`] → bytes.
//!
//! Processing is strictly sequential and fails loud: the first malformed
//! document, translator failure, or I/O error ends the run.

pub mod batch;
pub mod catalog;
pub mod entity;
pub mod error;
pub mod lexer;
pub mod pipeline;
pub mod placeholder;
pub mod traits;
pub mod translator;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    batch::{FileReport, ModuleSpec, run_module, run_modules},
    error::Error,
    pipeline::{translate_document, translate_string},
    translator::{EchoTranslator, Translator},
    types::{Document, Node},
};
