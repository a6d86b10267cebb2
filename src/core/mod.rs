//! core
//!
//! Core domain types and configuration for gitversion.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Oid, RefName
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing

pub mod config;
pub mod types;
