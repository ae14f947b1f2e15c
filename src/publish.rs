use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::config::Settings;
use crate::git;

/// Pick the published file name: swap a leading `YYYY-MM-DD` prefix for
/// today's date, or prepend one if the draft never carried a date.
pub fn published_name(draft_file: &str, today: NaiveDate) -> String {
    let today = today.format("%Y-%m-%d").to_string();
    let dated = draft_file
        .get(..10)
        .is_some_and(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok());
    if dated {
        format!("{}{}", today, &draft_file[10..])
    } else {
        format!("{}-{}", today, draft_file)
    }
}

/// Rewrite the first `date:` line to today's date. Every other byte of the
/// content passes through untouched.
pub fn rewrite_date(content: &str, today: NaiveDate) -> String {
    let mut out = String::with_capacity(content.len());
    let mut changed = false;
    for line in content.split_inclusive('\n') {
        if !changed && line.starts_with("date:") {
            changed = true;
            out.push_str(&format!("date: {}", today.format("%Y-%m-%d")));
            if line.ends_with('\n') {
                out.push('\n');
            }
        } else {
            out.push_str(line);
        }
    }
    out
}

/// Move a draft to the posts folder under today's date, refresh its date
/// field, and commit the move.
pub fn publish_draft(settings: &Settings, draft_file: &str, today: NaiveDate) -> Result<()> {
    let draft_path = settings.drafts_dir().join(draft_file);
    let content = fs::read_to_string(&draft_path)
        .map_err(|e| anyhow::anyhow!("Failed to read draft {}: {}", draft_path.display(), e))?;

    let new_name = published_name(draft_file, today);
    let post_path = settings.posts_dir().join(&new_name);
    if post_path.exists() {
        return Err(anyhow::anyhow!(
            "Destination post already exists: {}",
            post_path.display()
        ));
    }

    fs::write(&post_path, rewrite_date(&content, today))
        .map_err(|e| anyhow::anyhow!("Failed to write post {}: {}", post_path.display(), e))?;

    let project = &settings.project_path;
    git::ensure_repo(project)?;
    git::add(project, &[&post_path])?;
    // Removes the draft from the index and disk in one go; does nothing
    // if the draft was never committed, so sweep up the file afterwards.
    git::rm_forced(project, &draft_path);
    if draft_path.is_file() {
        fs::remove_file(&draft_path)
            .map_err(|e| anyhow::anyhow!("Failed to remove {}: {}", draft_path.display(), e))?;
    }
    git::commit(project, &format!("Publish post: {}", draft_file))?;
    git::push(project)?;

    println!("Published {}", new_name);
    Ok(())
}

/// Stage everything under the drafts and posts folders and push a single
/// checkpoint commit.
pub fn save_all(settings: &Settings) -> Result<()> {
    let project = &settings.project_path;
    git::ensure_repo(project)?;
    git::add(
        project,
        &[
            Path::new(&settings.drafts_folder),
            Path::new(&settings.posts_folder),
        ],
    )?;
    if !git::has_staged_changes(project)? {
        println!("Nothing to save.");
        return Ok(());
    }
    git::commit(project, "Save drafts and edited posts")?;
    git::push(project)?;
    println!("Saved drafts and edited posts.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn published_name_replaces_date_prefix() {
        assert_eq!(
            published_name("2023-11-30-my-post.md", date("2024-05-06")),
            "2024-05-06-my-post.md"
        );
    }

    #[test]
    fn published_name_prepends_when_undated() {
        assert_eq!(
            published_name("my-post.md", date("2024-05-06")),
            "2024-05-06-my-post.md"
        );
    }

    #[test]
    fn rewrite_date_touches_exactly_one_line() {
        let content = "---\nlayout: post\ntitle: \"T\"\ndate: 2023-11-30\n---\nbody date: 2023-11-30\ndate: 2023-11-30\n";
        let rewritten = rewrite_date(content, date("2024-05-06"));
        assert_eq!(
            rewritten,
            "---\nlayout: post\ntitle: \"T\"\ndate: 2024-05-06\n---\nbody date: 2023-11-30\ndate: 2023-11-30\n"
        );
    }

    #[test]
    fn rewrite_date_preserves_missing_trailing_newline() {
        let content = "---\ndate: 2023-11-30";
        assert_eq!(rewrite_date(content, date("2024-05-06")), "---\ndate: 2024-05-06");
    }

    #[test]
    fn rewrite_date_without_date_line_is_identity() {
        let content = "---\ntitle: T\n---\nbody\n";
        assert_eq!(rewrite_date(content, date("2024-05-06")), content);
    }
}
