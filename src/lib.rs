//! Todd the potato: a scripted responder in front of a text-generation API.
//!
//! Fixed triggers (greeting, pledge, portrait questionnaire) are answered
//! locally; everything else goes to the remote model and is sanitized
//! before it reaches the user.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod facts;
pub mod history;
pub mod models;
pub mod persona;
pub mod portrait;
pub mod router;
pub mod sanitizer;
pub mod service;
pub mod session;
pub mod transcript;
