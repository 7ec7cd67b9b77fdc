//! Parsed font tables

pub mod glyf;
