//! CLI command implementations for supakeys.

pub mod generate;
