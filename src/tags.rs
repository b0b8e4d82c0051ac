use std::slice;

use itertools::Itertools;

use crate::{filename::sanitize_tag_name, Tag};

/// An ordered list of tags.
///
/// This is a structural container plus safe rendering;
/// no category- or alias-aware logic lives here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagList(Vec<Tag>);

impl TagList {
    pub fn new() -> TagList {
        TagList(Vec::new())
    }

    pub fn push(&mut self, tag: Tag) {
        self.0.push(tag);
    }

    /// Replace the tag at `index`,
    /// returning the previous one.
    ///
    /// Panics if `index` is out of bounds.
    pub fn replace(&mut self, index: usize, tag: Tag) -> Tag {
        std::mem::replace(&mut self.0[index], tag)
    }

    /// Remove and return the tag at `index`.
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Tag {
        self.0.remove(index)
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.0.get(index)
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Tag> {
        self.0.iter()
    }

    /// The canonical text form for file names:
    /// every contained name sanitized
    /// (trimmed, inner spaces to `_`, illegal characters stripped)
    /// and space-joined in sequence order,
    /// with no trailing separator.
    ///
    /// No length check is performed here;
    /// that is the generator's job.
    pub fn filename_fragment(&self) -> String {
        self.0
            .iter()
            .map(|tag| sanitize_tag_name(tag.name()))
            .join(" ")
    }
}

impl From<Vec<Tag>> for TagList {
    fn from(value: Vec<Tag>) -> Self {
        TagList(value)
    }
}

impl FromIterator<Tag> for TagList {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        TagList(iter.into_iter().collect())
    }
}

impl Extend<Tag> for TagList {
    fn extend<I: IntoIterator<Item = Tag>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for TagList {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a Tag;
    type IntoIter = slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::*;

    use super::*;

    #[test]
    fn filename_fragment_sanitizes_and_joins_in_order() {
        let tags: TagList = [tag("blue eyes"), tag(" long hair "), tag("k-on!")]
            .into_iter()
            .collect();
        assert_eq!(tags.filename_fragment(), "blue_eyes long_hair k-on!");
    }

    #[test]
    fn filename_fragment_strips_illegal_characters() {
        let tags: TagList = [tag("re:zero"), tag("a/b")].into_iter().collect();
        assert_eq!(tags.filename_fragment(), "rezero ab");
    }

    #[test]
    fn filename_fragment_of_empty_list_is_empty() {
        assert_eq!(TagList::new().filename_fragment(), "");
    }

    #[test]
    fn replace_swaps_in_place() {
        let mut tags: TagList = [tag("foo"), tag("bar")].into_iter().collect();
        let old = tags.replace(1, tag("baz"));
        assert_eq!(old, tag("bar"));
        assert_eq!(
            tags,
            [tag("foo"), tag("baz")].into_iter().collect::<TagList>()
        );
    }
}
