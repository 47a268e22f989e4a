use crate::config::Config;
use ignore::WalkBuilder;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Type of discovered file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Swift,
    Xib,
    Storyboard,
    Nib,
}

impl FileType {
    /// Determine file type from path
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        match extension {
            "swift" => Some(FileType::Swift),
            "xib" => Some(FileType::Xib),
            "storyboard" => Some(FileType::Storyboard),
            "nib" => Some(FileType::Nib),
            _ => None,
        }
    }

    /// Swift source, searched for declarations and references
    pub fn is_source(&self) -> bool {
        matches!(self, FileType::Swift)
    }

    /// Interface-definition file, searched for class/selector/property bindings
    pub fn is_interface(&self) -> bool {
        matches!(self, FileType::Xib | FileType::Storyboard | FileType::Nib)
    }
}

/// A discovered file, optionally carrying preloaded contents so the pipeline
/// can run against in-memory sources in tests
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path to the file
    pub path: PathBuf,

    /// Type of file
    pub file_type: FileType,

    contents: Option<String>,
}

impl SourceFile {
    pub fn new(path: PathBuf, file_type: FileType) -> Self {
        Self {
            path,
            file_type,
            contents: None,
        }
    }

    /// A file whose contents never touch the filesystem
    pub fn with_contents(
        path: impl Into<PathBuf>,
        file_type: FileType,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            file_type,
            contents: Some(contents.into()),
        }
    }

    /// The path as the string identifier used in Declaration records
    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// Return preloaded contents, or read from disk
    pub fn read_contents(&self) -> Result<String> {
        if let Some(contents) = &self.contents {
            return Ok(contents.clone());
        }
        std::fs::read_to_string(&self.path).into_diagnostic()
    }
}

/// File finder for discovering Swift and interface files in a project
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Find all analyzable files under the given root
    pub fn find_files(&self, root: &Path) -> Result<Vec<SourceFile>> {
        debug!("Scanning for files in: {}", root.display());

        let targets = if self.config.targets.is_empty() {
            vec![root.to_path_buf()]
        } else {
            self.config.targets.iter().map(|t| root.join(t)).collect()
        };

        let mut files = Vec::new();
        for target in &targets {
            files.extend(self.scan_directory(target));
        }

        debug!("Found {} files", files.len());
        Ok(files)
    }

    /// Scan a single directory
    fn scan_directory(&self, dir: &Path) -> Vec<SourceFile> {
        if !dir.exists() {
            trace!("Directory does not exist: {}", dir.display());
            return Vec::new();
        }

        let walker = WalkBuilder::new(dir)
            .hidden(true)           // Skip hidden files
            .git_ignore(true)       // Respect .gitignore
            .git_global(true)       // Respect global gitignore
            .git_exclude(true)      // Respect .git/info/exclude
            .ignore(true)           // Respect .ignore files
            .parents(true)          // Check parent directories for ignore files
            .follow_links(false)    // Don't follow symlinks
            .build();

        walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();

                if self.config.should_exclude(path) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }

                let file_type = FileType::from_path(path)?;

                trace!("Found {:?}: {}", file_type, path.display());
                Some(SourceFile::new(path.to_path_buf(), file_type))
            })
            .collect()
    }

    /// Find only Swift source files
    pub fn find_source_files(&self, root: &Path) -> Result<Vec<SourceFile>> {
        let files = self.find_files(root)?;
        Ok(files.into_iter().filter(|f| f.file_type.is_source()).collect())
    }

    /// Find only interface-definition files
    pub fn find_interface_files(&self, root: &Path) -> Result<Vec<SourceFile>> {
        let files = self.find_files(root)?;
        Ok(files
            .into_iter()
            .filter(|f| f.file_type.is_interface())
            .collect())
    }
}

/// Statistics about discovered files
#[derive(Debug, Default)]
pub struct FileStats {
    pub swift_files: usize,
    pub xib_files: usize,
    pub storyboard_files: usize,
    pub nib_files: usize,
}

impl FileStats {
    pub fn from_files(files: &[SourceFile]) -> Self {
        let mut stats = Self::default();
        for file in files {
            match file.file_type {
                FileType::Swift => stats.swift_files += 1,
                FileType::Xib => stats.xib_files += 1,
                FileType::Storyboard => stats.storyboard_files += 1,
                FileType::Nib => stats.nib_files += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.swift_files + self.xib_files + self.storyboard_files + self.nib_files
    }

    pub fn interface_files(&self) -> usize {
        self.xib_files + self.storyboard_files + self.nib_files
    }
}
