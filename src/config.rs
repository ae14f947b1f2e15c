use anyhow::Result;
use std::env::home_dir;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Persisted tool settings, stored as newline-separated `key=value` pairs
/// in the user's home directory. Keys are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project_path: PathBuf,
    pub drafts_folder: String,
    pub posts_folder: String,
    pub images_folder: String,
}

/// Determine the path to the settings file.
/// Returns None if the home directory cannot be determined.
pub fn default_path() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".quill"))
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// Returns Ok(None) when the file is missing or any of the four fields
    /// is absent; the caller treats that as a first run and starts setup.
    pub fn load(path: &Path) -> Result<Option<Settings>> {
        if !path.is_file() {
            return Ok(None);
        }

        let s = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read settings {}: {}", path.display(), e))?;

        let mut project_path = None;
        let mut drafts_folder = None;
        let mut posts_folder = None;
        let mut images_folder = None;

        for line in s.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().to_string();
            match key.trim().to_lowercase().as_str() {
                "project_path" => project_path = Some(PathBuf::from(value)),
                "drafts_folder" => drafts_folder = Some(value),
                "posts_folder" => posts_folder = Some(value),
                "images_folder" => images_folder = Some(value),
                _ => {}
            }
        }

        match (project_path, drafts_folder, posts_folder, images_folder) {
            (Some(project_path), Some(drafts_folder), Some(posts_folder), Some(images_folder)) => {
                Ok(Some(Settings {
                    project_path,
                    drafts_folder,
                    posts_folder,
                    images_folder,
                }))
            }
            _ => Ok(None),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut f = fs::File::create(path)
            .map_err(|e| anyhow::anyhow!("Failed to write settings {}: {}", path.display(), e))?;
        writeln!(f, "project_path={}", self.project_path.display())?;
        writeln!(f, "drafts_folder={}", self.drafts_folder)?;
        writeln!(f, "posts_folder={}", self.posts_folder)?;
        writeln!(f, "images_folder={}", self.images_folder)?;
        Ok(())
    }

    pub fn drafts_dir(&self) -> PathBuf {
        self.project_path.join(&self.drafts_folder)
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.project_path.join(&self.posts_folder)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.project_path.join(&self.images_folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Settings {
        Settings {
            project_path: PathBuf::from("/home/me/blog"),
            drafts_folder: "_drafts".to_string(),
            posts_folder: "_posts".to_string(),
            images_folder: "images".to_string(),
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let td = tempdir().unwrap();
        let path = td.path().join("settings");
        let settings = sample();
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, Some(settings));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let td = tempdir().unwrap();
        let path = td.path().join("settings");
        fs::write(
            &path,
            "PROJECT_PATH=/home/me/blog\nDrafts_Folder=_drafts\nposts_folder = _posts\nIMAGES_FOLDER= images\n",
        )
        .unwrap();
        let loaded = Settings::load(&path).unwrap().unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn missing_field_loads_as_none() {
        let td = tempdir().unwrap();
        let path = td.path().join("settings");
        fs::write(&path, "project_path=/home/me/blog\ndrafts_folder=_drafts\n").unwrap();
        assert_eq!(Settings::load(&path).unwrap(), None);
    }

    #[test]
    fn missing_file_loads_as_none() {
        let td = tempdir().unwrap();
        let path = td.path().join("no-such-file");
        assert_eq!(Settings::load(&path).unwrap(), None);
    }

    #[test]
    fn resolved_dirs_join_project_path() {
        let settings = sample();
        assert_eq!(settings.drafts_dir(), PathBuf::from("/home/me/blog/_drafts"));
        assert_eq!(settings.images_dir(), PathBuf::from("/home/me/blog/images"));
    }
}
