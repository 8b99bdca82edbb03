pub mod attendance;
pub mod employee;
pub mod health;

use actix_web::{HttpRequest, error, web};

use crate::error::HrmError;

/// Routes body/query extraction failures through the common error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        error::Error::from(HrmError::InvalidInput(err.to_string()))
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        error::Error::from(HrmError::InvalidInput(err.to_string()))
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        error::Error::from(HrmError::InvalidInput(err.to_string()))
    })
}
