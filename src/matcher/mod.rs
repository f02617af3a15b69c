//! Pattern matching for generated addresses.
//!
//! Supports three matching strategies:
//! - Substring: Match anywhere in the address
//! - Prefix: Match at the start of the address
//! - Postfix: Match at the end of the address

mod pattern;

pub use pattern::{MatchMode, Pattern};
