#![forbid(unsafe_code)]

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod seed;

pub use routes::router;
