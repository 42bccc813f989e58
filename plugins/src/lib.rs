pub mod factory;
pub mod generator;
pub mod http;
pub mod index;
