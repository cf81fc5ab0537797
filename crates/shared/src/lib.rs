//! Shared utilities for the CMS and the setup wizard.
//!
//! This crate provides functionality used by both servers:
//! - The setup-completion predicate over the private config file
//! - Workspace settings discovery (version, interface languages)
//! - Text direction lookup for interface languages
//! - Config value validation
//! - Secret generation and content hashing

pub mod crypto;
pub mod setup_check;
pub mod text_direction;
pub mod validation;
pub mod workspace;
