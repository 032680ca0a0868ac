//! Foundation types for conch.
//!
//! This crate contains the types shared by the interpreter engine and every
//! host application: the closed error taxonomy and the crate-wide `Result`
//! alias.

pub mod error;
