//! Application services layer.

pub mod admin;
pub mod browser;
pub mod error;
pub mod sources;
pub mod stream;
