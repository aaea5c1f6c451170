//! Sygaldry: a metadata-driven component runtime for digital musical
//! instruments and related sensor-driven systems.
//!
//! An instrument is an [`Assembly`](assembly::Assembly) of components —
//! aggregates of typed, tagged, range-annotated endpoints plus lifecycle
//! subroutines. The [`Runtime`](runtime::Runtime) drives a fixed
//! single-threaded tick (`external_sources` → `main` →
//! `external_destinations`) over the tree, and a family of bindings acts
//! generically over any tree through the reflection layer: a line-oriented
//! CLI, an OSC server/client over UDP, a JSON session-state store, and an
//! output-change logger. Every endpoint is addressable at a deterministic
//! OSC path derived from its component and endpoint names.

#![deny(unused_must_use)]

pub mod assembly;
pub mod cli;
pub mod component;
pub mod endpoints;
pub mod error;
pub mod osc;
pub mod output_logger;
pub mod runtime;
pub mod session;
pub mod spelling;
pub mod test_component;

pub use error::{Error, Result};
