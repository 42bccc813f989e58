pub mod api;
pub mod config;
pub mod context;
pub mod embed;
pub mod error;
pub mod generator;
pub mod index;
pub mod input;
pub mod pipeline;
pub mod records;
