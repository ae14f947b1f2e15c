use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::config::Settings;

/// Turn a post title into a clean file name: trim, spaces to dashes, and
/// drop anything a filesystem or URL would choke on.
pub fn valid_filename(title: &str) -> String {
    const DISALLOWED: &[char] = &[
        '~', '#', '%', '&', '*', '{', '}', '\\', ':', '<', '>', '?', '/', '+', '|',
    ];
    title
        .trim()
        .replace(' ', "-")
        .chars()
        .filter(|c| !DISALLOWED.contains(c))
        .collect()
}

/// Escape the title for embedding in front-matter rendered to HTML later.
pub fn escape_title(title: &str) -> String {
    title
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn front_matter(title: &str, category: &str, tags: &[String], date: NaiveDate) -> String {
    format!(
        "---\nlayout: post\ntitle: \"{title}\"\ncategory: {category}\ntags: [{tags}]\ndate: {date}\n---",
        title = escape_title(title),
        category = category,
        tags = tags.join(", "),
        date = date.format("%Y-%m-%d"),
    )
}

pub fn draft_filename(title: &str, today: NaiveDate) -> String {
    format!("{}-{}.md", today.format("%Y-%m-%d"), valid_filename(title))
}

/// Write a fresh draft with templated front-matter into the drafts folder
/// and return its path. Refuses to clobber an existing draft.
pub fn create_draft(
    settings: &Settings,
    title: &str,
    category: &str,
    tags: &[String],
    today: NaiveDate,
) -> Result<PathBuf> {
    let file_name = draft_filename(title, today);
    let draft_path = settings.drafts_dir().join(&file_name);
    if draft_path.exists() {
        return Err(anyhow::anyhow!(
            "Draft already exists: {}",
            draft_path.display()
        ));
    }
    let content = front_matter(title, category, tags, today);
    fs::write(&draft_path, content)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", draft_path.display(), e))?;
    Ok(draft_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn settings_for(td: &tempfile::TempDir) -> Settings {
        std::fs::create_dir_all(td.path().join("_drafts")).unwrap();
        Settings {
            project_path: td.path().to_path_buf(),
            drafts_folder: "_drafts".to_string(),
            posts_folder: "_posts".to_string(),
            images_folder: "images".to_string(),
        }
    }

    #[test]
    fn filename_cleaning_strips_disallowed_characters() {
        assert_eq!(valid_filename("  My Title  "), "My-Title");
        assert_eq!(valid_filename("a/b:c?d|e"), "abcde");
        assert_eq!(valid_filename("C++ & Rust"), "C-&-Rust");
    }

    #[test]
    fn title_is_html_escaped() {
        assert_eq!(escape_title("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn new_draft_has_expected_name_and_front_matter() {
        let td = tempdir().unwrap();
        let settings = settings_for(&td);
        let tags = vec!["tag1".to_string(), "tag2".to_string()];
        let path =
            create_draft(&settings, "My Title", "cat", &tags, date("2024-05-06")).unwrap();

        assert_eq!(
            path,
            PathBuf::from(td.path().join("_drafts/2024-05-06-My-Title.md"))
        );
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("---\nlayout: post\n"));
        assert!(content.contains("title: \"My Title\""));
        assert!(content.contains("category: cat"));
        assert!(content.contains("tags: [tag1, tag2]"));
        assert!(content.contains("date: 2024-05-06"));
        assert!(content.ends_with("---"));

        // The scanner reads back what the template wrote.
        let record = meta::scan_file(&path).unwrap();
        assert_eq!(record.category.as_deref(), Some("cat"));
        assert_eq!(record.tags, vec!["tag1", "tag2"]);
    }

    #[test]
    fn create_draft_refuses_to_overwrite() {
        let td = tempdir().unwrap();
        let settings = settings_for(&td);
        let today = date("2024-05-06");
        create_draft(&settings, "Same", "cat", &[], today).unwrap();
        assert!(create_draft(&settings, "Same", "cat", &[], today).is_err());
    }
}
