//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — model identifiers on the inference service
//! - [`idea::Idea`] — a validated product idea
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod idea;
pub mod model;
pub mod string;
