//! Personal-training platform core: who may act on which record, the trainer
//! hiring workflow, and progress statistics derived from workout logs.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod services;

pub use errors::{CoreError, DenyReason, ErrorKind};
