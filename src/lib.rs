//! blogdesk: a session-gated admin listing of published blog records.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
