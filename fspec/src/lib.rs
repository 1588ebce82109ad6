// src/lib.rs
//! Expansion of command-line file specifications for file tools.
//!
//! An [`Enumerator`] takes arguments such as `*.txt`, `src\*\*.rs`,
//! `?:\boot.ini`, `@list.txt` and `-s`, resolves them against a
//! [`DirSource`](crate::core::dirs::DirSource), and hands every match to a
//! [`Visitor`].

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod tools;
pub mod utils;
pub mod visitor;

pub use cli::{Args, Tool, run};
pub use crate::core::enumerator::Enumerator;
pub use error::SpecError;
pub use models::{Attributes, DirEntry, EnumerationOptions, PassFlags, Progress};
pub use visitor::{OptionOutcome, Visitor};
