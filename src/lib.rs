//! Library crate for hunt-back, the treasure-hunt event backend, exposing
//! modules for the binaries and integration tests.

pub mod config;
pub mod dao;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
