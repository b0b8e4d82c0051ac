use std::path::{Path, PathBuf};

use crate::{
    filename::{extension, is_image_ext},
    ImageFile, Source, WINDOWS_PATH_CEILING,
};

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("`{0}` is not a directory")]
    NotADirectory(PathBuf),
    #[error(transparent)]
    Filesystem(#[from] std::io::Error),
}

/// A directory of images downloaded from one source,
/// each carrying its booru id somewhere in its file name.
#[derive(Debug, Clone)]
pub struct ImageDirectory {
    dir: PathBuf,
    source: Source,
}

impl ImageDirectory {
    pub fn new<P>(dir: P, source: Source) -> Result<ImageDirectory, DirectoryError>
    where
        P: Into<PathBuf>,
    {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(DirectoryError::NotADirectory(dir));
        }
        // The absolute form is what counts against the path ceiling.
        let dir = std::path::absolute(&dir)?;
        Ok(ImageDirectory { dir, source })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn source(&self) -> Source {
        self.source
    }

    /// Length of the absolute directory path,
    /// the part of the path ceiling already spent.
    pub fn path_len(&self) -> usize {
        self.dir.as_os_str().len()
    }

    /// Name budget left under the path ceiling
    /// once this directory and a separator are paid for.
    pub fn name_budget(&self) -> usize {
        WINDOWS_PATH_CEILING.saturating_sub(self.path_len() + 1)
    }

    /// Every file in the directory
    /// with a supported image extension
    /// and a recognizable id,
    /// in ascending id order.
    /// Files that match neither are skipped silently.
    pub fn images(&self) -> std::io::Result<Vec<ImageFile>> {
        let mut images = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !is_image_ext(extension(name)) {
                continue;
            }
            let Some(id) = self.source.extract_id(name) else {
                continue;
            };
            if let Ok(image) = ImageFile::new(id, &path) {
                images.push(image);
            }
        }
        images.sort_by_key(ImageFile::id);
        Ok(images)
    }
}
