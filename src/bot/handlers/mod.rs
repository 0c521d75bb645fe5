//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions that are not commands
//! themselves: autocomplete suggestions and permission checks.

/// Autocomplete handlers for brand and platform names
pub mod autocomplete;
/// Permission checks run before staff-only commands
pub mod checks;
