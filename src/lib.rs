//! Core library for the neo-tools command line application.
//!
//! The library loads a catalog of near-Earth objects and a table of their
//! close approaches, normalizes the quirks of both sources, links them, and
//! exports approaches to CSV or JSON. Responsibilities stay narrow: file
//! adapters live under [`io`], entities and normalization rules inside
//! [`model`], linking in [`database`], and orchestration under [`pipeline`].

pub mod database;
pub mod dates;
pub mod error;
pub mod extract;
pub mod io;
pub mod logging;
pub mod model;
pub mod pipeline;

pub use error::{NeoError, Result};
