pub mod config;
pub mod document;
pub mod domain;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod quiz;
pub mod routes;
pub mod session;
pub mod speech;
pub mod state;
