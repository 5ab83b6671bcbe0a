pub mod example;
pub mod headers;
pub mod params;
pub mod responses;
pub mod routes;
pub mod server;
pub mod spec_to_env;

pub use spec_to_env::{convert, convert_with_options};
