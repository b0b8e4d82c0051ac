use crate::{ILLEGAL_NAME_CHARS, IMAGE_EXTS};

pub fn has_illegal_chars(s: &str) -> bool {
    s.contains(ILLEGAL_NAME_CHARS)
}

pub fn strip_illegal_chars(s: &str) -> String {
    s.chars().filter(|c| !ILLEGAL_NAME_CHARS.contains(c)).collect()
}

/// Prepare a tag name for use inside a file name:
/// trim the ends,
/// substitute inner spaces with `_`
/// so tags stay distinguishable from one another,
/// and strip characters Windows refuses.
pub fn sanitize_tag_name(name: &str) -> String {
    strip_illegal_chars(&name.trim().replace(' ', "_"))
}

/// The extension of `filename`,
/// dot included,
/// or `""` if there is none.
pub fn extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(pos) => &filename[pos..],
        None => "",
    }
}

/// `filename` without its extension.
/// A suffix longer than 5 bytes (dot included) is not an extension,
/// so `misaki vs. kurehito` comes back whole.
pub fn stem(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(pos) if filename.len() - pos <= 5 => &filename[..pos],
        _ => filename,
    }
}

pub fn is_image_ext(ext: &str) -> bool {
    IMAGE_EXTS.iter().any(|x| x.eq_ignore_ascii_case(ext))
}
