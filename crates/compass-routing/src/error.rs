//! Routing error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Invalid route template \"{template}\": {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("Duplicate route name: {0}")]
    DuplicateName(String),

    #[error("No route named \"{0}\"")]
    UnknownName(String),

    #[error("Missing parameter \"{param}\" for template \"{template}\"")]
    MissingParam { template: String, param: String },
}
