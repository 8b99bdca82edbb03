pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod server;
pub mod service;
pub mod store;

pub use error::{ErrorKind, HrmError, HrmResult, StoreError};
