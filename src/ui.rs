use anyhow::Result;
use inquire::Select;
use std::path::Path;

use crate::meta;

/// List the folder and prompt the user to pick a file, optionally
/// narrowing the choices with a metadata keyword first.
/// Returns Ok(None) when nothing matches or the prompt is cancelled.
pub fn pick_file(dir: &Path, filter: Option<&str>) -> Result<Option<String>> {
    let records = meta::scan_folder(dir)?;
    let names: Vec<String> = match filter {
        Some(keyword) => meta::filter_by_keyword(keyword, &records),
        None => records.into_iter().map(|r| r.filename).collect(),
    };

    if names.is_empty() {
        println!("No matching files found.");
        return Ok(None);
    }

    let selection = Select::new("Select a file:", names)
        .with_vim_mode(true)
        .without_filtering()
        .with_help_message("hjkl to move, enter, esc to quit")
        .prompt_skippable()?;

    match selection {
        Some(name) => Ok(Some(name)),
        None => {
            println!("Cancelled.");
            Ok(None)
        }
    }
}
