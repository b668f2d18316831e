pub mod config;
pub mod content_api;
pub mod date_format;
pub mod error;
pub mod logger;
pub mod paginator;
pub mod post;
pub mod server;
pub mod view;
mod query_string;
mod test_data;
