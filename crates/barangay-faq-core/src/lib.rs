//! # Barangay FAQ Core
//!
//! Shared, I/O-free logic for the Barangay Legal Aid FAQ responder: the
//! corpus data model, the [`CorpusSource`](source::CorpusSource) seam,
//! lexical similarity scoring, the matcher, and the two-tier responder.
//!
//! This crate performs no filesystem or network access. The calling
//! application decides where a corpus comes from and hands it over through
//! a [`CorpusSource`](source::CorpusSource) implementation.

pub mod matcher;
pub mod models;
pub mod responder;
pub mod similarity;
pub mod source;
