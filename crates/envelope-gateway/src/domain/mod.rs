//! Domain types: wire contracts, configuration, errors, field validation.

pub mod config;
pub mod contracts;
pub mod error;
pub mod validation;
