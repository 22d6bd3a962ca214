use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    ApiStatus { status: u16, message: String },

    /// Service-level failure: the response envelope carried success != "true".
    /// One line per error string, in the service's order.
    #[error("{}", errors.join("\n"))]
    Api { errors: Vec<String> },

    #[error("Failed to parse API response: {0}")]
    XmlParse(#[from] quick_xml::de::DeError),

    #[error("Failed to serialize request body: {0}")]
    XmlSerialize(#[from] quick_xml::se::SeError),

    #[error("API reported success but returned no payload")]
    EmptyResponse,

    #[error("Invalid {kind} ID {value:?}: IDs must be digits only")]
    InvalidId { kind: &'static str, value: String },

    #[error("Unknown story field {0:?}")]
    UnknownStoryField(String),

    #[error("Invalid value {value:?} for story field {field:?}")]
    InvalidFieldValue { field: &'static str, value: String },

    #[error("Missing required story field {0:?}")]
    MissingField(&'static str),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error(
        "No API token found. Set TRACKER_TOKEN env var or add General.APIKey to ~/.tracker.yml"
    )]
    MissingToken,

    #[error("Project {0:?} is not defined in the Projects section of the config")]
    UnknownProject(String),

    #[error("DefaultProject {0:?} does not match any key in the Projects section")]
    UnknownDefaultProject(String),

    #[error("No project given and no DefaultProject in config")]
    NoProject,
}

pub type Result<T> = std::result::Result<T, TrackerError>;
