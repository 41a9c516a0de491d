//! Hierarchy service
//!
//! Reads flat path lists (text or directory scans) and renders them as
//! hierarchies in the configured output format.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::{OutputFormat, Settings};
use crate::domain::{
    build_tree, flatten, forest_to_tree, inspect, leaf_paths, DelimitedPath, Entry, HierPath,
    Node,
};

/// Label of the synthetic root in tree output when none is given.
pub const DEFAULT_TREE_LABEL: &str = ".";

/// Service for turning flat path lists into rendered hierarchies.
pub struct HierarchyService {
    settings: Settings,
}

impl HierarchyService {
    /// Create a new hierarchy service.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Parse one path per line.
    ///
    /// Lines are trimmed, comment lines are dropped, blank lines are dropped
    /// when `skip_blank_lines` is set (otherwise they become empty, invalid
    /// paths), and everything else is split on the configured delimiter.
    pub fn parse_paths(&self, text: &str) -> Vec<DelimitedPath> {
        text.lines()
            .filter_map(|line| self.path_line(line))
            .map(|line| DelimitedPath::new(line, self.settings.delimiter.as_str()))
            .collect()
    }

    fn path_line<'l>(&self, line: &'l str) -> Option<&'l str> {
        let line = line.trim();
        let prefix = self.settings.comment_prefix.as_str();
        if !prefix.is_empty() && line.starts_with(prefix) {
            return None;
        }
        if self.settings.skip_blank_lines && line.is_empty() {
            return None;
        }
        Some(line)
    }

    /// Read a path list from `reader`; `source` names it in error messages.
    pub fn read_paths<R: BufRead>(
        &self,
        reader: R,
        source: &Path,
    ) -> ApplicationResult<Vec<DelimitedPath>> {
        let mut paths = Vec::new();
        for line in reader.lines() {
            let line = line.with_path_context("read path list", source)?;
            if let Some(path) = self.path_line(&line) {
                paths.push(DelimitedPath::new(path, self.settings.delimiter.as_str()));
            }
        }
        debug!("read {} paths from {}", paths.len(), source.display());
        Ok(paths)
    }

    /// Read a path list from a file.
    #[instrument(level = "debug", skip(self))]
    pub fn read_file(&self, path: &Path) -> ApplicationResult<Vec<DelimitedPath>> {
        let file = File::open(path).with_path_context("open path list", path)?;
        self.read_paths(BufReader::new(file), path)
    }

    /// Read a path list from standard input.
    pub fn read_stdin(&self) -> ApplicationResult<Vec<DelimitedPath>> {
        self.read_paths(io::stdin().lock(), Path::new("<stdin>"))
    }

    /// Collect the paths of all regular files below `dir`, relative to `dir`.
    ///
    /// Components come straight from the filesystem, so names containing the
    /// configured delimiter stay intact. `extension` keeps only files with
    /// that extension (given without the leading dot).
    #[instrument(level = "debug", skip(self))]
    pub fn scan_directory(
        &self,
        dir: &Path,
        extension: Option<&str>,
    ) -> ApplicationResult<Vec<Vec<String>>> {
        if !dir.is_dir() {
            return Err(ApplicationError::OperationFailed {
                context: format!("scan directory: {}", dir.display()),
                source: Box::new(io::Error::new(
                    io::ErrorKind::NotFound,
                    "not a directory",
                )),
            });
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1) {
            let entry = entry.map_err(|e| ApplicationError::OperationFailed {
                context: format!("scan directory: {}", dir.display()),
                source: Box::new(e),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(ext) = extension {
                if entry.path().extension().and_then(|e| e.to_str()) != Some(ext) {
                    continue;
                }
            }
            let relative = entry.path().strip_prefix(dir).map_err(|e| {
                ApplicationError::OperationFailed {
                    context: format!("relativize {}", entry.path().display()),
                    source: Box::new(e),
                }
            })?;
            paths.push(
                relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect(),
            );
        }
        debug!("scanned {} files below {}", paths.len(), dir.display());
        Ok(paths)
    }

    /// Build the forest for `paths`.
    pub fn forest<'a, E: HierPath>(&self, paths: &'a [E]) -> ApplicationResult<Vec<Node<'a, E>>> {
        build_tree(paths).map_err(ApplicationError::from)
    }

    /// Build and flatten `paths`.
    pub fn entries<'a, E: HierPath>(
        &self,
        paths: &'a [E],
    ) -> ApplicationResult<Vec<Entry<'a, E>>> {
        let forest = self.forest(paths)?;
        Ok(flatten(&forest)?)
    }

    /// Render `paths` as output lines in `format`.
    ///
    /// `label` names the synthetic root of the `tree` format.
    #[instrument(level = "debug", skip(self, paths), fields(paths = paths.len()))]
    pub fn render<E: HierPath>(
        &self,
        paths: &[E],
        format: OutputFormat,
        label: &str,
    ) -> ApplicationResult<Vec<String>> {
        let forest = self.forest(paths)?;
        let lines = match format {
            OutputFormat::Inspect => inspect(&flatten(&forest)?),
            OutputFormat::Entries => flatten(&forest)?
                .iter()
                .map(|e| {
                    format!(
                        "{}\t{}\t{}\t{}",
                        e.parent,
                        e.name,
                        e.element.is_some(),
                        e.leaf
                    )
                })
                .collect(),
            OutputFormat::Tree => forest_to_tree(&forest, label)
                .to_string()
                .lines()
                .map(str::to_string)
                .collect(),
            OutputFormat::Leaves => leaf_paths(&forest, &self.settings.delimiter),
        };
        Ok(lines)
    }
}
