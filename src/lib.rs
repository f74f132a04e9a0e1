pub mod app;
pub mod auth;
pub mod config;
pub mod envelope;
pub mod error;
pub mod export;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod storage;
pub mod store;
pub mod validation;
