//! # backoffice-core
//!
//! Core crate for the back-office gate. Contains configuration schemas,
//! capability and route types, the stored-user model, collaborator traits,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other back-office crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
