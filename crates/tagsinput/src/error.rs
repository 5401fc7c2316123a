use thiserror::Error;
use uuid::Uuid;

use crate::attributes::Attribute;
use crate::validation::ValidationError;
use crate::widgets::WidgetKind;

#[derive(Error, Debug)]
pub enum TagsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    #[error("Invalid tag style: {0:?} (expected one of primary, success, info, warning, danger or an empty string)")]
    InvalidStyle(String),

    #[error("Invalid number format: {0}")]
    InvalidFormat(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Attribute {attribute} is not supported by {kind} widgets")]
    UnsupportedAttribute {
        kind: WidgetKind,
        attribute: Attribute,
    },

    #[error("Invalid value for attribute {attribute}: {reason}")]
    InvalidAttribute { attribute: Attribute, reason: String },

    #[error("Unknown widget model: {0}")]
    UnknownModel(String),

    #[error("Widget not found: {0}")]
    WidgetNotFound(Uuid),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

pub type Result<T> = std::result::Result<T, TagsError>;
