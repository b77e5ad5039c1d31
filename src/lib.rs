pub mod config;
pub mod http_client;
pub mod logos;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod selectors;
pub mod text;
pub mod writer;
