use colored::Colorize;

use crate::cli::{StoryAddArgs, StoryDeleteArgs};
use crate::client::TrackerClient;
use crate::config::Config;
use crate::error::{Result, TrackerError};
use crate::output;
use crate::types::{Story, StoryFields};

pub async fn add(client: &TrackerClient, config: &Config, args: StoryAddArgs) -> Result<()> {
    let project_id = config.resolve_project(
        args.target.project.as_deref(),
        args.target.project_id.as_deref(),
    )?;

    let mut fields = StoryFields {
        name: Some(args.name),
        requested_by: args.requested_by.or_else(|| config.general.me.clone()),
        description: args.description,
        estimate: args.estimate,
        labels: args.labels,
        created_at: args.created_at,
        note: args.note,
        story_type: args.story_type,
        current_state: args.current_state,
    };

    // Dynamic --field KEY=VALUE entries go through the allow-list.
    for field in &args.fields {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| TrackerError::UnknownStoryField(field.clone()))?;
        fields.set(key, value)?;
    }

    let story = client.add_story(&project_id, &fields).await?;

    output::print_item(&story, display_story);

    Ok(())
}

pub async fn delete(client: &TrackerClient, config: &Config, args: StoryDeleteArgs) -> Result<()> {
    let project_id = config.resolve_project(
        args.target.project.as_deref(),
        args.target.project_id.as_deref(),
    )?;

    let message = client.delete_story(&project_id, &args.story_id).await?;

    output::print_message(&message);

    Ok(())
}

fn display_story(story: &Story) {
    println!("{} {}", format!("#{}", story.id).bright_black(), story.name.bold());

    let mut line = Vec::new();
    if let Some(story_type) = story.story_type {
        line.push(format!("Type: {}", story_type.colored()));
    }
    if let Some(state) = story.current_state {
        line.push(format!("State: {}", state.colored()));
    }
    if let Some(estimate) = story.estimate {
        line.push(format!("Estimate: {estimate}"));
    }
    if !line.is_empty() {
        println!("  {}", line.join("  "));
    }

    if let Some(requested_by) = &story.requested_by {
        println!("  Requested by: {requested_by}");
    }
    if !story.labels.is_empty() {
        println!("  Labels: {}", story.labels.join(", "));
    }
    if let Some(created_at) = &story.created_at {
        println!("  Created: {}", output::format_date(created_at));
    }
    if let Some(url) = &story.url {
        println!("  URL: {url}");
    }
    if let Some(description) = &story.description {
        println!("\n{description}");
    }
}
