use std::{
    fmt::Write,
    path::{Path, PathBuf},
};

use crate::{ParseTagError, TagList};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed record at line {line}: {source}")]
    Malformed { line: usize, source: ParseTagError },
}

#[derive(Debug, thiserror::Error)]
#[error("failed to write `{path}`: {source}")]
pub struct SaveError {
    path: PathBuf,
    source: std::io::Error,
}

/// Tag knowledge persisted as a flat text file:
/// one encoded record per line,
/// newline-terminated,
/// in sequence order.
/// No header and no version marker;
/// every save rewrites the whole file.
#[derive(Debug, Clone)]
pub struct TagStore {
    path: PathBuf,
}

impl TagStore {
    pub fn new<P>(path: P) -> TagStore
    where
        P: Into<PathBuf>,
    {
        TagStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, tags: &TagList) -> Result<(), SaveError> {
        let mut contents = String::new();
        for tag in tags {
            // Writing to a String cannot fail.
            let _ = writeln!(contents, "{tag}");
        }
        std::fs::write(&self.path, contents).map_err(|source| SaveError {
            path: self.path.clone(),
            source,
        })
    }

    /// Load every record,
    /// failing the whole load on an unreadable file
    /// or any malformed line.
    pub fn load(&self) -> Result<TagList, LoadError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        contents
            .lines()
            .enumerate()
            .map(|(index, line)| {
                line.parse().map_err(|source| LoadError::Malformed {
                    line: index + 1,
                    source,
                })
            })
            .collect()
    }
}
