use anyhow::Result;
use inquire::Text;
use std::path::{Path, PathBuf};

use crate::config::Settings;

const MAX_RETRIES: usize = 3;

/// First-run setup: prompt for the project path and the three folder
/// names, validate each, and write the settings file.
pub fn run(settings_path: &Path) -> Result<()> {
    println!("This seems to be your first time using quill.");
    println!("A few settings are needed before the tool can run.");

    let project_path = PathBuf::from(prompt_until_valid(
        "[1] Your blog project full path:",
        |answer| Path::new(answer).is_dir(),
    )?);

    let drafts_folder = prompt_until_valid("[2] Folder for your drafts:", |answer| {
        !answer.is_empty() && project_path.join(answer).is_dir()
    })?;
    let posts_folder = prompt_until_valid("[3] Folder for your published posts:", |answer| {
        !answer.is_empty() && project_path.join(answer).is_dir()
    })?;
    let images_folder = prompt_until_valid("[4] Folder for your images:", |answer| {
        !answer.is_empty() && project_path.join(answer).is_dir()
    })?;

    let settings = Settings {
        project_path,
        drafts_folder,
        posts_folder,
        images_folder,
    };
    settings.save(settings_path)?;
    println!("Configuration done. Enjoy the tool.");
    Ok(())
}

/// Ask until `validate` accepts the trimmed answer, with a fixed retry
/// budget. Exits with an error once the budget is spent.
fn prompt_until_valid(message: &str, validate: impl Fn(&str) -> bool) -> Result<String> {
    let mut answer = Text::new(message).prompt()?.trim().to_string();
    let mut retries = MAX_RETRIES;
    while !validate(&answer) && retries > 0 {
        println!("Please input an existing path:");
        answer = Text::new(message).prompt()?.trim().to_string();
        retries -= 1;
    }
    if validate(&answer) {
        Ok(answer)
    } else {
        Err(anyhow::anyhow!("Path still not valid. Exiting..."))
    }
}
