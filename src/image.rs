use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::clipboard;
use crate::config::Settings;
use crate::git;

/// Name the stored image after the draft it belongs to, suffixing `-1`,
/// `-2`, ... while the name is taken.
pub fn target_name(draft_file: &str, ext: &str, taken: impl Fn(&str) -> bool) -> String {
    let stem = draft_file.strip_suffix(".md").unwrap_or(draft_file);
    let mut name = format!("{stem}.{ext}");
    let mut index = 1;
    while taken(&name) {
        name = format!("{stem}-{index}.{ext}");
        index += 1;
    }
    name
}

/// Render the snippet pasted into the post body. Width and height come
/// from the sniffed header so the page doesn't reflow while loading.
pub fn embed_snippet(images_folder: &str, name: &str, width: u32, height: u32) -> String {
    let alt = name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name);
    format!(
        "<img src=\"/{images_folder}/{name}\" alt=\"{alt}\" width=\"{width}\" height=\"{height}\" />"
    )
}

/// Move an image into the images folder under the draft's name, stage it,
/// and hand the embed snippet to the clipboard.
pub fn attach_image(settings: &Settings, image_path: &Path, draft_file: &str) -> Result<()> {
    let (width, height) = image::image_dimensions(image_path).map_err(|e| {
        anyhow::anyhow!(
            "Could not read image dimensions from {}: {}",
            image_path.display(),
            e
        )
    })?;

    let ext = image_path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            anyhow::anyhow!("Image has no file extension: {}", image_path.display())
        })?;

    let images_dir = settings.images_dir();
    let name = target_name(draft_file, ext, |candidate| {
        images_dir.join(candidate).is_file()
    });
    let dest = images_dir.join(&name);
    move_file(image_path, &dest)?;

    git::ensure_repo(&settings.project_path)?;
    git::add(&settings.project_path, &[&dest])?;

    let snippet = embed_snippet(&settings.images_folder, &name, width, height);
    println!("{}", snippet);
    if let Err(e) = clipboard::copy(&snippet) {
        eprintln!("Warning: failed to copy snippet to clipboard: {}", e);
    } else {
        println!("Snippet copied to clipboard.");
    }
    Ok(())
}

// rename() cannot cross filesystems, so fall back to copy + remove.
fn move_file(src: &Path, dest: &Path) -> Result<()> {
    if fs::rename(src, dest).is_ok() {
        return Ok(());
    }
    fs::copy(src, dest).map_err(|e| {
        anyhow::anyhow!(
            "Failed to copy {} to {}: {}",
            src.display(),
            dest.display(),
            e
        )
    })?;
    fs::remove_file(src)
        .map_err(|e| anyhow::anyhow!("Failed to remove {}: {}", src.display(), e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn target_name_uses_draft_stem() {
        let taken: HashSet<String> = HashSet::new();
        let name = target_name("2024-05-06-my-post.md", "png", |n| taken.contains(n));
        assert_eq!(name, "2024-05-06-my-post.png");
    }

    #[test]
    fn target_name_suffixes_on_collision() {
        let taken: HashSet<&str> =
            HashSet::from(["post.png", "post-1.png"]);
        let name = target_name("post.md", "png", |n| taken.contains(n));
        assert_eq!(name, "post-2.png");
    }

    #[test]
    fn embed_snippet_carries_dimensions() {
        let snippet = embed_snippet("images", "post.png", 640, 480);
        assert_eq!(
            snippet,
            "<img src=\"/images/post.png\" alt=\"post\" width=\"640\" height=\"480\" />"
        );
    }

    #[test]
    fn unrecognized_format_is_a_distinct_error() {
        let td = tempfile::tempdir().unwrap();
        let bogus = td.path().join("not-an-image.png");
        std::fs::write(&bogus, b"plain text").unwrap();
        let err = image::image_dimensions(&bogus);
        assert!(err.is_err());
    }
}
