use std::io::{self, Write};

use crate::config::Config;
use crate::error::{Result, TrackerError};

fn prompt(question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Tracker CLI Configuration");
    println!("=========================\n");

    let api_key = prompt("Enter your API token: ")?;
    if api_key.is_empty() {
        return Err(TrackerError::MissingToken);
    }

    let me = prompt("Enter your name as known to the tracker [optional]: ")?;
    let project_name = prompt("Enter a project name [optional]: ")?;

    let project_id = if project_name.is_empty() {
        String::new()
    } else {
        loop {
            let id = prompt(&format!("Enter the numeric ID for {project_name:?}: "))?;
            if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
                break id;
            }
            println!("Project IDs are digits only.");
        }
    };

    let mut contents = String::from("General:\n");
    contents.push_str(&format!("  APIKey: \"{api_key}\"\n"));
    if !me.is_empty() {
        contents.push_str(&format!("  Me: \"{me}\"\n"));
    }
    if !project_name.is_empty() {
        contents.push_str(&format!("  DefaultProject: \"{project_name}\"\n"));
        contents.push_str(&format!("Projects:\n  {project_name}: {project_id}\n"));
    }

    std::fs::write(&config_path, contents).map_err(|e| TrackerError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'tracker' commands!");

    Ok(())
}
