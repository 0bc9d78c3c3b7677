//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep HTTP/CLI layers decoupled from storage details.
//! - Feed stored datasets and entries into the projection engine.

pub mod dataset_service;
pub mod entry_service;
pub mod projection_service;
