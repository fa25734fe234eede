pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod tmdb;
