//! BondKeeper — a small personal-relationship manager.
//!
//! Ingests CSV message logs into a local SQLite store and generates
//! AI-drafted reply suggestions via the Google Generative Language API,
//! surfaced through a CLI and a browser dashboard.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`db`] — SQLite database initialization and schema
//! - [`store`] — Contacts and conversation messages
//! - [`ingest`] — CSV message-log import
//! - [`llm`] — Generative Language API client, model selection, failure classification
//! - [`suggest`] — Prompt assembly and suggestion generation
//! - [`server`] — The browser dashboard

pub mod cli;
pub mod config;
pub mod db;
pub mod ingest;
pub mod llm;
pub mod server;
pub mod store;
pub mod suggest;
