pub mod access;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod irrigations;
pub mod pivots;
pub mod state;
pub mod store;
pub mod users;
pub mod validation;
