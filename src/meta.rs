use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const DELIMITER: &str = "---";

/// Metadata scanned from one file's front-matter block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    pub filename: String,
    pub title: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

/// Aggregated metadata of a whole folder, built fresh per invocation.
/// BTreeMaps give the alphabetical iteration order the reporters rely on.
#[derive(Debug, Default, Serialize)]
pub struct MetaIndex {
    pub categories: BTreeMap<String, usize>,
    pub tags: BTreeMap<String, usize>,
    pub titles: BTreeMap<String, String>,
}

/// Scan every non-hidden regular file in `dir`, sorted by filename.
pub fn scan_folder(dir: &Path) -> Result<Vec<PostRecord>> {
    let mut records = Vec::new();
    if !dir.is_dir() {
        return Ok(records);
    }
    for entry in fs::read_dir(dir)
        .map_err(|e| anyhow::anyhow!("Failed to read folder {}: {}", dir.display(), e))?
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        records.push(scan_file(&path)?);
    }
    records.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(records)
}

pub fn scan_file(path: &Path) -> Result<PostRecord> {
    let filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid filename: {}", path.display()))?
        .to_string();
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    Ok(parse_front_matter(filename, &content))
}

/// Parse the leading front-matter block of `content`.
///
/// A file whose first line is not the delimiter yields an empty record.
/// A block with no closing delimiter simply ends at EOF.
pub fn parse_front_matter(filename: String, content: &str) -> PostRecord {
    let mut record = PostRecord {
        filename,
        ..Default::default()
    };

    let mut lines = content.lines();
    match lines.next() {
        Some(first) if first.starts_with(DELIMITER) => {}
        _ => return record,
    }

    for line in lines {
        if line.starts_with(DELIMITER) {
            break;
        }
        if let Some(rest) = line.strip_prefix("title:") {
            record.title = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("category:") {
            record.category = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("tags:") {
            record.tags = parse_tag_list(rest);
        }
    }
    record
}

/// Parse a `[a, b, c]` tag list, trimming each element and dropping empties.
fn parse_tag_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);
    inner
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

impl MetaIndex {
    pub fn build(records: &[PostRecord]) -> MetaIndex {
        let mut index = MetaIndex::default();
        for record in records {
            if let Some(category) = &record.category {
                *index.categories.entry(category.clone()).or_insert(0) += 1;
            }
            for tag in &record.tags {
                *index.tags.entry(tag.clone()).or_insert(0) += 1;
            }
            if let Some(title) = &record.title {
                // Duplicate titles overwrite; last write wins.
                index.titles.insert(title.clone(), record.filename.clone());
            }
        }
        index
    }
}

/// Narrow a record set down to the filenames matching `keyword`:
/// an exact category match, a title substring match, or an exact tag
/// match, all case-insensitive.
pub fn filter_by_keyword(keyword: &str, records: &[PostRecord]) -> Vec<String> {
    let keyword = keyword.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase() == keyword)
                || record
                    .title
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&keyword))
                || record.tags.iter().any(|t| t.to_lowercase() == keyword)
        })
        .map(|record| record.filename.clone())
        .collect()
}
