//! Survey band naming and discovery of band files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};

/// File extensions accepted as band images.
const BAND_EXTENSIONS: [&str; 5] = ["fit", "fits", "fts", "tif", "tiff"];

/// Digitized Sky Survey plates fetched for each object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Survey {
    Dss2Ir,
    Dss2Red,
    Dss2Blue,
}

/// Composite channel a band feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Survey {
    pub const ALL: [Survey; 3] = [Survey::Dss2Ir, Survey::Dss2Red, Survey::Dss2Blue];

    /// Survey name as the image service spells it.
    pub fn name(self) -> &'static str {
        match self {
            Survey::Dss2Ir => "DSS2 IR",
            Survey::Dss2Red => "DSS2 Red",
            Survey::Dss2Blue => "DSS2 Blue",
        }
    }

    /// File stem used for a downloaded plate, e.g. `DSS2_Red`.
    pub fn file_stem(self) -> String {
        self.name().replace(' ', "_")
    }

    /// Longest wavelength drives red, shortest drives blue.
    pub fn channel(self) -> Channel {
        match self {
            Survey::Dss2Ir => Channel::Red,
            Survey::Dss2Red => Channel::Green,
            Survey::Dss2Blue => Channel::Blue,
        }
    }

    /// Matches a file stem case-insensitively, with spaces or underscores.
    pub fn from_file_stem(stem: &str) -> Option<Survey> {
        let normalized = stem.trim().replace(' ', "_");
        Survey::ALL
            .into_iter()
            .find(|s| s.file_stem().eq_ignore_ascii_case(&normalized))
    }
}

fn is_band_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| BAND_EXTENSIONS.iter().any(|b| e.eq_ignore_ascii_case(b)))
}

/// Finds the three band files of an object folder, ordered red, green, blue.
///
/// When every file stem names a distinct survey the files are ordered by
/// [`Survey::channel`]; otherwise they are taken in file name order.
///
/// # Errors
///
/// * `InputReadError` - the folder cannot be listed
/// * `BandCountMismatch` - the folder does not hold exactly three band files
pub fn discover_band_files(dir: &Path) -> Result<[PathBuf; 3]> {
    let entries = fs::read_dir(dir)
        .map_err(|e| PipelineError::InputReadError(format!("{}: {}", dir.display(), e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if is_band_file(&path) {
            files.push(path);
        }
    }
    files.sort();

    debug!("Found {} band files in {}", files.len(), dir.display());

    let found = files.len();
    let mut keyed: Vec<(Option<Channel>, PathBuf)> = files
        .into_iter()
        .map(|path| {
            let channel = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(Survey::from_file_stem)
                .map(Survey::channel);
            (channel, path)
        })
        .collect();

    let mut channels: Vec<Channel> = keyed.iter().filter_map(|(c, _)| *c).collect();
    channels.sort();
    channels.dedup();
    if channels.len() == 3 && keyed.len() == 3 {
        keyed.sort_by_key(|(c, _)| *c);
    }

    let paths: Vec<PathBuf> = keyed.into_iter().map(|(_, p)| p).collect();
    <[PathBuf; 3]>::try_from(paths).map_err(|_| PipelineError::BandCountMismatch {
        dir: dir.to_path_buf(),
        found,
    })
}
