use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::filename::{extension, has_illegal_chars, stem};

#[derive(Debug, thiserror::Error)]
pub enum ImageFileError {
    #[error("image id must be greater than 0")]
    InvalidId,
    #[error("`{0}` is not a readable file")]
    NotAFile(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum RenameError {
    #[error("`{0}` contains a character illegal in file names")]
    IllegalName(String),
    #[error(transparent)]
    Filesystem(#[from] std::io::Error),
}

/// An image file belonging to a booru,
/// paired with the id it carries there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    id: u32,
    path: PathBuf,
}

impl ImageFile {
    /// The file must exist and be readable.
    pub fn new<P>(id: u32, path: P) -> Result<ImageFile, ImageFileError>
    where
        P: Into<PathBuf>,
    {
        if id == 0 {
            return Err(ImageFileError::InvalidId);
        }
        let path = path.into();
        if !path.is_file() {
            return Err(ImageFileError::NotAFile(path));
        }
        Ok(ImageFile { id, path })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rename this file in place.
    ///
    /// `new_name` is a base name,
    /// never a path:
    /// the parent directory is preserved,
    /// as is the file's real extension
    /// (any extension on `new_name` is discarded).
    /// A name still carrying illegal characters is rejected
    /// before anything touches the filesystem.
    pub fn rename(&mut self, new_name: &str) -> Result<(), RenameError> {
        if has_illegal_chars(new_name) {
            return Err(RenameError::IllegalName(new_name.to_owned()));
        }
        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let target = match self.path.parent() {
            Some(parent) => parent.join(format!("{}{}", stem(new_name), extension(file_name))),
            None => PathBuf::from(format!("{}{}", stem(new_name), extension(file_name))),
        };
        std::fs::rename(&self.path, &target)?;
        self.path = target;
        Ok(())
    }
}

/// `id`, a tab, and the path.
/// Enough to reconstruct the record,
/// and the form the `ids` command prints.
impl fmt::Display for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.id, self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::*;

    use super::*;

    #[test]
    fn new_rejects_a_zero_id() {
        with_temp_dir(|dir| {
            let path = create_file(dir, "Konachan.com - 1.png");
            assert!(matches!(
                ImageFile::new(0, &path),
                Err(ImageFileError::InvalidId)
            ));
        });
    }

    #[test]
    fn new_rejects_a_missing_file() {
        with_temp_dir(|dir| {
            assert!(matches!(
                ImageFile::new(1, dir.join("missing.png")),
                Err(ImageFileError::NotAFile(_))
            ));
        });
    }

    #[test]
    fn rename_preserves_extension_and_parent() {
        with_temp_dir(|dir| {
            let path = create_file(dir, "Konachan.com - 1.png");
            let mut file = ImageFile::new(1, &path).unwrap();
            file.rename("Konachan.com - 1 blue_eyes").unwrap();
            assert_eq!(file.path(), dir.join("Konachan.com - 1 blue_eyes.png"));
            assert!(file.path().is_file());
            assert!(!path.exists());
        });
    }

    #[test]
    fn rename_discards_an_extension_on_the_new_name() {
        with_temp_dir(|dir| {
            let path = create_file(dir, "a.jpeg");
            let mut file = ImageFile::new(1, &path).unwrap();
            file.rename("b.png").unwrap();
            assert_eq!(file.path(), dir.join("b.jpeg"));
        });
    }

    #[test]
    fn rename_rejects_illegal_names_before_touching_the_filesystem() {
        with_temp_dir(|dir| {
            let path = create_file(dir, "a.png");
            let mut file = ImageFile::new(1, &path).unwrap();
            assert!(matches!(
                file.rename("sub/dir"),
                Err(RenameError::IllegalName(_))
            ));
            assert!(matches!(
                file.rename("what?"),
                Err(RenameError::IllegalName(_))
            ));
            assert!(path.is_file());
        });
    }
}
