use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::ProjectArgs;
use crate::client::TrackerClient;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::types::ProjectDetails;

#[derive(Serialize)]
struct ProjectEntry {
    name: String,
    id: u64,
    default: bool,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: u64,
}

impl From<&ProjectEntry> for ProjectRow {
    fn from(entry: &ProjectEntry) -> Self {
        Self {
            name: if entry.default {
                format!("{} {}", entry.name, "(default)".bright_black())
            } else {
                entry.name.clone()
            },
            id: entry.id,
        }
    }
}

/// List the projects defined in the config file. No network involved.
pub fn list(config: &Config) -> Result<()> {
    let entries: Vec<ProjectEntry> = config
        .projects
        .iter()
        .map(|(name, id)| ProjectEntry {
            name: name.clone(),
            id: *id,
            default: config.general.default_project.as_deref() == Some(name),
        })
        .collect();

    if entries.is_empty() {
        output::print_message("No projects configured. Run 'tracker init' to set some up.");
        return Ok(());
    }

    output::print_table(&entries, |entry| ProjectRow::from(entry));

    Ok(())
}

pub async fn show(client: &TrackerClient, config: &Config, args: ProjectArgs) -> Result<()> {
    let project_id = config.resolve_project(args.project.as_deref(), args.project_id.as_deref())?;

    let details = client.project_details(&project_id).await?;

    output::print_item(&details, |details: &ProjectDetails| {
        println!("{}", details.name.bold());
        if let Some(length) = details.iteration_length {
            println!(
                "  Iteration length: {length} week{}",
                if length == 1 { "" } else { "s" }
            );
        }
        if let Some(scale) = &details.point_scale {
            println!("  Point scale: {scale}");
        }
        if let Some(day) = &details.week_start_day {
            println!("  Week starts on: {day}");
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_row_marks_default() {
        let entry = ProjectEntry {
            name: "website".to_string(),
            id: 42,
            default: true,
        };
        let row = ProjectRow::from(&entry);
        assert!(row.name.contains("website"));
        assert!(row.name.contains("(default)"));
        assert_eq!(row.id, 42);
    }

    #[test]
    fn test_project_rows_map_by_reference() {
        let entries = vec![
            ProjectEntry {
                name: "backend".to_string(),
                id: 77,
                default: false,
            },
            ProjectEntry {
                name: "website".to_string(),
                id: 42,
                default: false,
            },
        ];

        let rows: Vec<ProjectRow> = entries.iter().map(|entry| ProjectRow::from(entry)).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "backend");
        assert_eq!(rows[1].id, 42);
    }
}
