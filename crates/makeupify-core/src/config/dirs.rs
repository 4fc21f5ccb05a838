use directories::ProjectDirs;
use std::path::PathBuf;

/// Application directories following XDG spec
#[derive(Debug, Clone)]
pub struct Directories {
    /// Config directory (~/.config/makeupify)
    pub config: PathBuf,

    /// Config file path
    pub config_file: PathBuf,
}

impl Directories {
    /// Create a new `Directories` instance with standard XDG paths.
    ///
    /// # Panics
    ///
    /// Panics if the system's project directories cannot be determined.
    #[must_use]
    pub fn new() -> Self {
        let project = ProjectDirs::from("", "", "makeupify")
            .expect("Failed to determine project directories");

        let config = project.config_dir().to_path_buf();

        Self {
            config_file: config.join("config.json"),
            config,
        }
    }
}

impl Default for Directories {
    fn default() -> Self {
        Self::new()
    }
}
