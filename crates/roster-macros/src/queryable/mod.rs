//! Implementation of the `#[derive(Queryable)]` macro.
//!
//! Generates field accessors and field name constants for roster records
//! from `#[query]` field annotations.

mod attrs;
mod derive;

pub use derive::queryable_derive_impl;
