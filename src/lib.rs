//! # Barangay FAQ
//!
//! FAQ-matching chatbot fallback for the Barangay Legal Aid web application.
//!
//! Given a user's chat message, the responder searches a small corpus of
//! categorized question/answer pairs and returns the best-matching answer,
//! using character-sequence similarity plus a keyword-overlap boost and a
//! two-tier acceptance threshold. When nothing is close enough, a fixed
//! default message points the user to the legal aid office.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌─────────────┐
//! │  faq.json    │──▶│   Corpus     │──▶│   Matcher   │
//! │ (categories) │   │  Provider    │   │ sim + words │
//! └──────────────┘   └──────────────┘   └──────┬──────┘
//!                                              │
//!                                       ┌──────▼──────┐
//!                                       │  Responder  │
//!                                       │ 0.5 → 0.3   │
//!                                       └──────┬──────┘
//!                               ┌──────────────┤
//!                               ▼              ▼
//!                          ┌─────────┐    ┌─────────┐
//!                          │   CLI   │    │  HTTP   │
//!                          │  (faq)  │    │ (/chat) │
//!                          └─────────┘    └─────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! faq check                          # validate the corpus
//! faq ask "paano mag-file ng kaso?"  # chatbot reply
//! faq match "office hours" --explain # score breakdown
//! faq serve                          # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`corpus`] | Lazily loaded, file-backed corpus provider |
//! | [`ask`] | `ask` and `match` commands |
//! | [`catalog`] | `categories` and `check` commands |
//! | [`server`] | HTTP server |
//!
//! The matching logic itself lives in the `barangay-faq-core` crate.

pub mod ask;
pub mod catalog;
pub mod config;
pub mod corpus;
pub mod server;
