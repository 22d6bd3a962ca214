use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TrackerError};

/// Story kinds understood by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryType {
    Feature,
    Release,
    Bug,
    Chore,
}

impl StoryType {
    pub fn as_str(self) -> &'static str {
        match self {
            StoryType::Feature => "feature",
            StoryType::Release => "release",
            StoryType::Bug => "bug",
            StoryType::Chore => "chore",
        }
    }

    /// Colored label for terminal output.
    pub fn colored(self) -> String {
        let label = self.as_str();
        match self {
            StoryType::Feature => label.green().to_string(),
            StoryType::Release => label.yellow().to_string(),
            StoryType::Bug => label.red().to_string(),
            StoryType::Chore => label.bright_black().to_string(),
        }
    }
}

impl fmt::Display for StoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoryType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "feature" => Ok(StoryType::Feature),
            "release" => Ok(StoryType::Release),
            "bug" => Ok(StoryType::Bug),
            "chore" => Ok(StoryType::Chore),
            _ => Err(()),
        }
    }
}

/// Workflow states a story moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryState {
    Unscheduled,
    Unstarted,
    Started,
    Finished,
    Delivered,
    Accepted,
    Rejected,
}

impl StoryState {
    pub fn as_str(self) -> &'static str {
        match self {
            StoryState::Unscheduled => "unscheduled",
            StoryState::Unstarted => "unstarted",
            StoryState::Started => "started",
            StoryState::Finished => "finished",
            StoryState::Delivered => "delivered",
            StoryState::Accepted => "accepted",
            StoryState::Rejected => "rejected",
        }
    }

    /// Colored label for terminal output.
    pub fn colored(self) -> String {
        let label = self.as_str();
        match self {
            StoryState::Unscheduled | StoryState::Unstarted => {
                label.bright_black().to_string()
            }
            StoryState::Started => label.blue().to_string(),
            StoryState::Finished => label.cyan().to_string(),
            StoryState::Delivered => label.magenta().to_string(),
            StoryState::Accepted => label.green().to_string(),
            StoryState::Rejected => label.red().to_string(),
        }
    }
}

impl fmt::Display for StoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoryState {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "unscheduled" => Ok(StoryState::Unscheduled),
            "unstarted" => Ok(StoryState::Unstarted),
            "started" => Ok(StoryState::Started),
            "finished" => Ok(StoryState::Finished),
            "delivered" => Ok(StoryState::Delivered),
            "accepted" => Ok(StoryState::Accepted),
            "rejected" => Ok(StoryState::Rejected),
            _ => Err(()),
        }
    }
}

/// A story as returned by the API.
#[derive(Debug, Deserialize, Serialize)]
pub struct Story {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub estimate: Option<i32>,
    pub current_state: Option<StoryState>,
    pub created_at: Option<String>,
    pub story_type: Option<StoryType>,
    pub requested_by: Option<String>,
    /// Always a collection, even when the response carried a single
    /// `<label>` element or no `<labels>` block at all.
    #[serde(default, deserialize_with = "deserialize_labels")]
    pub labels: Vec<String>,
    pub url: Option<String>,
}

fn deserialize_labels<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize, Default)]
    struct Labels {
        #[serde(default)]
        label: Vec<String>,
    }

    Ok(Option::<Labels>::deserialize(deserializer)?
        .unwrap_or_default()
        .label)
}

/// Fields for a story create request.
///
/// The struct is fully typed; [`StoryFields::set`] is the dynamic entry point
/// (used by `--field KEY=VALUE`) and enforces the service's field allow-list
/// before any request is built.
#[derive(Debug, Default, Clone)]
pub struct StoryFields {
    pub name: Option<String>,
    pub requested_by: Option<String>,
    pub description: Option<String>,
    pub estimate: Option<i32>,
    pub labels: Vec<String>,
    pub created_at: Option<String>,
    pub note: Option<String>,
    pub story_type: Option<StoryType>,
    pub current_state: Option<StoryState>,
}

impl StoryFields {
    /// Set a field by its wire name. Unknown keys and unparseable values are
    /// rejected here, before any network I/O. `labels` appends.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "name" => self.name = Some(value.to_string()),
            "requested_by" => self.requested_by = Some(value.to_string()),
            "description" => self.description = Some(value.to_string()),
            "estimate" => {
                let estimate = value.parse().map_err(|_| TrackerError::InvalidFieldValue {
                    field: "estimate",
                    value: value.to_string(),
                })?;
                self.estimate = Some(estimate);
            }
            "labels" => self.labels.push(value.to_string()),
            "created_at" => self.created_at = Some(value.to_string()),
            "note" => self.note = Some(value.to_string()),
            "story_type" => {
                let story_type =
                    value.parse().map_err(|()| TrackerError::InvalidFieldValue {
                        field: "story_type",
                        value: value.to_string(),
                    })?;
                self.story_type = Some(story_type);
            }
            "current_state" => {
                let state = value.parse().map_err(|()| TrackerError::InvalidFieldValue {
                    field: "current_state",
                    value: value.to_string(),
                })?;
                self.current_state = Some(state);
            }
            _ => return Err(TrackerError::UnknownStoryField(key.to_string())),
        }

        Ok(())
    }

    /// Check the required fields are present. Runs before the request body is
    /// built, so a failing call never reaches the transport.
    pub fn validate(&self) -> Result<()> {
        if self.name.as_deref().unwrap_or("").is_empty() {
            return Err(TrackerError::MissingField("name"));
        }
        if self.requested_by.as_deref().unwrap_or("").is_empty() {
            return Err(TrackerError::MissingField("requested_by"));
        }
        Ok(())
    }

    /// Serialize to the `<story>` request document. Labels render as repeated
    /// `<label>` children under a single `<labels>` element.
    pub fn to_xml(&self) -> Result<String> {
        #[derive(Serialize)]
        struct LabelsXml<'a> {
            label: &'a [String],
        }

        #[derive(Serialize)]
        struct StoryXml<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            requested_by: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            estimate: Option<i32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            labels: Option<LabelsXml<'a>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            created_at: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            note: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            story_type: Option<&'static str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            current_state: Option<&'static str>,
        }

        let body = StoryXml {
            name: self.name.as_deref(),
            requested_by: self.requested_by.as_deref(),
            description: self.description.as_deref(),
            estimate: self.estimate,
            labels: if self.labels.is_empty() {
                None
            } else {
                Some(LabelsXml {
                    label: &self.labels,
                })
            },
            created_at: self.created_at.as_deref(),
            note: self.note.as_deref(),
            story_type: self.story_type.map(StoryType::as_str),
            current_state: self.current_state.map(StoryState::as_str),
        };

        Ok(quick_xml::se::to_string_with_root("story", &body)?)
    }
}
