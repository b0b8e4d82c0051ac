mod extract;
mod fetcher;
mod filename;
mod image_file;
mod namegen;
mod renamer;
mod scan;
mod store;
mod tag;
mod tags;

#[cfg(test)]
mod testing;

pub use crate::{
    extract::{eshuushuu_id, konachan_id, yandere_id, Source, SourceError},
    fetcher::{FetchError, TagCache, TagSource},
    filename::{extension, has_illegal_chars, is_image_ext, sanitize_tag_name, stem},
    image_file::{ImageFile, ImageFileError, RenameError},
    namegen::{
        removal_order, InvalidIdError, NameGenerator, PrefixError, MAX_NAME_RESERVE,
        MIN_NAME_RESERVE,
    },
    renamer::{RenameSummary, Renamer, RenamerBuilder},
    scan::{DirectoryError, ImageDirectory},
    store::{LoadError, SaveError, TagStore},
    tag::{Category, ParseTagError, Tag, TagError},
    tags::TagList,
};

/// Characters Windows refuses in file names.
pub const ILLEGAL_NAME_CHARS: [char; 9] = ['\\', '/', '*', '?', '"', '<', '>', ':', '|'];

/// Longest extension a scanned image can carry, dot included.
/// Length budgeting always models this one
/// so a generated name fits no matter which extension the file really has.
pub const LONGEST_EXT: &str = ".jpeg";

/// Extensions accepted by directory scans.
pub const IMAGE_EXTS: [&str; 4] = [".png", ".jpg", ".jpeg", ".gif"];

/// Full-path ceiling, modeled after Windows' 260-character limit.
pub const WINDOWS_PATH_CEILING: usize = 260;
