use std::path::{Path, PathBuf};

use proptest::prelude::*;

use crate::{Category, Tag, TagList};

pub(crate) fn tag(name: &str) -> Tag {
    Tag::new(1, "test", name, 1, Category::General, None).unwrap()
}

pub(crate) fn tag_with(id: u32, name: &str, count: u32, category: Category) -> Tag {
    Tag::new(id, "test", name, count, category, None).unwrap()
}

pub(crate) fn with_temp_dir<F>(f: F)
where
    F: FnOnce(&Path),
{
    let dir = tempfile::tempdir().unwrap();
    f(dir.path());
}

pub(crate) fn create_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "").unwrap();
    path
}

pub(crate) fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::General),
        Just(Category::Faults),
        Just(Category::Circle),
        Just(Category::Character),
        Just(Category::Copyright),
        Just(Category::Artist),
    ]
}

/// Names safe for the line codec and for file names:
/// no tabs, newlines, or illegal filename characters.
fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9 _'!-]{0,15}"
}

pub(crate) fn arb_tag() -> impl Strategy<Value = Tag> {
    (
        1u32..=u32::MAX,
        "[a-z.]{1,12}",
        arb_name(),
        1u32..=u32::MAX,
        arb_category(),
    )
        .prop_map(|(id, origin, name, count, category)| {
            Tag::new(id, origin, name, count, category, None).unwrap()
        })
}

/// A tag with up to two levels of alias.
pub(crate) fn aliased_tag() -> impl Strategy<Value = Tag> {
    (arb_tag(), proptest::option::of((arb_tag(), proptest::option::of(arb_tag())))).prop_map(
        |(mut tag, alias)| {
            if let Some((mut alias, nested)) = alias {
                alias.set_alias(nested);
                tag.set_alias(Some(alias));
            }
            tag
        },
    )
}

pub(crate) fn tag_list(len: std::ops::Range<usize>) -> impl Strategy<Value = TagList> {
    proptest::collection::vec(arb_tag(), len).prop_map(TagList::from)
}
