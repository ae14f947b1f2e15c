use anyhow::Result;
use chrono::Local;
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;

mod clipboard;
mod complete;
mod config;
mod draft;
mod editor;
mod git;
mod image;
mod meta;
mod publish;
mod setup;
mod stats;
mod ui;

use complete::CandidateKind;
use config::Settings;

#[derive(Parser)]
#[command(name = "quill", version)]
#[command(about = "Draft, publish and manage Markdown blog posts in a git-backed site repository")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create a new draft and open it in the editor
    New {
        /// Title of the post
        title: String,
        /// Category of the post
        category: String,
        /// Tags of the post, separated by spaces
        tags: Vec<String>,
    },
    /// List metadata statistics over published posts
    Ls {
        #[arg(value_enum)]
        what: ListKind,
        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Commit and push all drafts and edited posts
    Save,
    /// Open a draft and continue writing
    Continue {
        /// Filter drafts by a keyword in title/category/tags
        #[arg(long)]
        filter: Option<String>,
        /// File name of the draft; picked interactively when omitted
        draft: Option<String>,
    },
    /// Publish a draft: re-date it, move it to the posts folder and push
    Publish {
        /// File name of the draft
        draft: String,
    },
    /// Attach an image to a draft and copy the embed snippet
    Image {
        /// Path of the image file
        path: PathBuf,
        /// File name of the draft the image belongs to
        draft: String,
    },
    /// Open a published post and edit it
    Edit {
        /// Filter posts by a keyword in title/category/tags
        #[arg(long)]
        filter: Option<String>,
        /// File name of the post; picked interactively when omitted
        post: Option<String>,
    },
    /// Print a shell completion script to stdout
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print raw completion candidates (used by the completion scripts)
    #[command(hide = true)]
    Candidates {
        #[arg(value_enum)]
        kind: CandidateKind,
        #[arg(long)]
        filter: Option<String>,
        prefix: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ListKind {
    Categories,
    Tags,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Completion scripts must work before any settings exist.
    if let Command::Completions { shell } = &args.command {
        let mut cmd = Args::command();
        generate(*shell, &mut cmd, "quill", &mut io::stdout());
        return Ok(());
    }

    let settings_path = config::default_path().ok_or_else(|| {
        anyhow::anyhow!("Could not determine the home directory on this platform.")
    })?;
    let settings = match Settings::load(&settings_path)? {
        Some(settings) => settings,
        None => return setup::run(&settings_path),
    };

    run_command(args.command, &settings)
}

fn run_command(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::New {
            title,
            category,
            tags,
        } => {
            let today = Local::now().date_naive();
            let path = draft::create_draft(settings, &title, &category, &tags, today)?;
            println!(
                "\"{}\" has been created under the {} folder.",
                path.file_name().and_then(|s| s.to_str()).unwrap_or(""),
                settings.drafts_folder
            );
            editor::open_file(&path)
        }
        Command::Ls { what, json } => {
            let records = meta::scan_folder(&settings.posts_dir())?;
            let index = meta::MetaIndex::build(&records);
            match what {
                ListKind::Categories => {
                    stats::print_counts("Category", "categories", &index.categories, json)
                }
                ListKind::Tags => stats::print_counts("Tag", "tags", &index.tags, json),
            }
        }
        Command::Save => publish::save_all(settings),
        Command::Continue { filter, draft } => {
            open_from(settings.drafts_dir(), filter.as_deref(), draft)
        }
        Command::Publish { draft } => {
            publish::publish_draft(settings, &draft, Local::now().date_naive())
        }
        Command::Image { path, draft } => image::attach_image(settings, &path, &draft),
        Command::Edit { filter, post } => {
            open_from(settings.posts_dir(), filter.as_deref(), post)
        }
        Command::Candidates {
            kind,
            filter,
            prefix,
        } => complete::print_candidates(settings, kind, filter.as_deref(), prefix.as_deref()),
        Command::Completions { .. } => unreachable!(), // handled in main
    }
}

/// Open a file from `dir` in the editor, picking one interactively when
/// no name was given on the command line.
fn open_from(dir: PathBuf, filter: Option<&str>, name: Option<String>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => match ui::pick_file(&dir, filter)? {
            Some(name) => name,
            None => return Ok(()),
        },
    };
    editor::open_file(&dir.join(name))
}
