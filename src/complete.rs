use anyhow::Result;
use clap::ValueEnum;

use crate::config::Settings;
use crate::meta::{self, MetaIndex};

/// What the hidden `candidates` subcommand should enumerate. The shell
/// completion scripts call it to complete file, category and tag
/// arguments.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CandidateKind {
    Drafts,
    Posts,
    Categories,
    Tags,
}

/// Print completion candidates one per line, prefix-narrowed. File kinds
/// honor the metadata keyword filter; category and tag kinds ignore it.
pub fn print_candidates(
    settings: &Settings,
    kind: CandidateKind,
    filter: Option<&str>,
    prefix: Option<&str>,
) -> Result<()> {
    let candidates = match kind {
        CandidateKind::Drafts => file_candidates(settings.drafts_dir().as_path(), filter)?,
        CandidateKind::Posts => file_candidates(settings.posts_dir().as_path(), filter)?,
        CandidateKind::Categories => {
            let records = meta::scan_folder(&settings.posts_dir())?;
            MetaIndex::build(&records).categories.into_keys().collect()
        }
        CandidateKind::Tags => {
            let records = meta::scan_folder(&settings.posts_dir())?;
            MetaIndex::build(&records).tags.into_keys().collect()
        }
    };

    let prefix = prefix.unwrap_or("");
    for candidate in candidates {
        if candidate.starts_with(prefix) {
            println!("{}", candidate);
        }
    }
    Ok(())
}

fn file_candidates(dir: &std::path::Path, filter: Option<&str>) -> Result<Vec<String>> {
    let records = meta::scan_folder(dir)?;
    Ok(match filter {
        Some(keyword) => meta::filter_by_keyword(keyword, &records),
        None => records.into_iter().map(|r| r.filename).collect(),
    })
}
