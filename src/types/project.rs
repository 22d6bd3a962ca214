use serde::{Deserialize, Serialize};

/// Project metadata as returned by `GET projects/{id}`.
#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectDetails {
    pub name: String,
    pub iteration_length: Option<u32>,
    pub point_scale: Option<String>,
    pub week_start_day: Option<String>,
}
