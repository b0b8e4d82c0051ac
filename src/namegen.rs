use std::cmp::Ordering;

use crate::{filename::has_illegal_chars, Tag, TagList, LONGEST_EXT};

/// Room a prefix must leave for a minimal tagged name:
/// `" 1234567 see_source.jpeg"`.
pub const MIN_NAME_RESERVE: usize = 24;

/// Room left under Windows' 260-character path ceiling
/// once a drive root and the longest extension are reserved.
pub const MAX_NAME_RESERVE: usize = 253;

/// Aliases are walked at most this many hops.
/// Owned alias values cannot form a cycle on their own,
/// but a decoded chain is caller data;
/// the cap bounds resolution no matter what it holds.
const ALIAS_HOP_LIMIT: usize = 64;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("prefix cannot be empty")]
pub struct PrefixError;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("image id must be greater than 0")]
pub struct InvalidIdError;

/// Generates moebooru-style file names,
/// `"prefix - id tag1 tag2"`,
/// dropping the least important tags
/// until the name fits a configured length budget.
///
/// Sites differ only in prefix and prefix/id separator;
/// the algorithm is shared.
#[derive(Clone, Debug)]
pub struct NameGenerator {
    prefix: String,
    separator: String,
    max_len: usize,
}

impl NameGenerator {
    /// A generator with the default `" - "` prefix/id separator.
    pub fn new<S>(prefix: S) -> Result<NameGenerator, PrefixError>
    where
        S: Into<String>,
    {
        Self::with_separator(prefix, " - ")
    }

    pub fn with_separator<S, T>(prefix: S, separator: T) -> Result<NameGenerator, PrefixError>
    where
        S: Into<String>,
        T: Into<String>,
    {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(PrefixError);
        }
        let max_len = prefix.len() + MAX_NAME_RESERVE;
        Ok(NameGenerator {
            prefix,
            separator: separator.into(),
            max_len,
        })
    }

    /// The Konachan profile: `"Konachan.com - id tags"`.
    pub fn konachan() -> NameGenerator {
        NameGenerator {
            prefix: "Konachan.com".to_owned(),
            separator: " - ".to_owned(),
            max_len: "Konachan.com".len() + MAX_NAME_RESERVE,
        }
    }

    /// The yande.re profile: no dash between prefix and id.
    pub fn yandere() -> NameGenerator {
        NameGenerator {
            prefix: "yande.re".to_owned(),
            separator: " ".to_owned(),
            max_len: "yande.re".len() + MAX_NAME_RESERVE,
        }
    }

    /// The e-shuushuu profile, default separator.
    pub fn eshuushuu() -> NameGenerator {
        NameGenerator {
            prefix: "e-shuushuu".to_owned(),
            separator: " - ".to_owned(),
            max_len: "e-shuushuu".len() + MAX_NAME_RESERVE,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Suggest a new length budget for generated names.
    ///
    /// The value is clamped into
    /// `[prefix + MIN_NAME_RESERVE, prefix + MAX_NAME_RESERVE]`;
    /// the returned value is the budget actually in effect,
    /// so callers can tell whether their suggestion was accepted.
    pub fn set_max_len(&mut self, value: usize) -> usize {
        self.max_len = value.clamp(
            self.prefix.len() + MIN_NAME_RESERVE,
            self.prefix.len() + MAX_NAME_RESERVE,
        );
        self.max_len
    }

    /// Generate a file name for the image `id` tagged with `tags`.
    ///
    /// Every tag is replaced by its terminal alias.
    /// An empty `tags` yields the single tag `tagme`.
    /// Tags with characters illegal in file names are dropped,
    /// and whenever any tag is dropped
    /// — for that reason or to satisfy the length budget —
    /// `see source` is added
    /// so the loss can be recovered from the origin later.
    ///
    /// Tags are dropped in order of category precedence,
    /// then ascending count:
    /// Artist > Copyright > Character > Circle > Faults > General,
    /// higher count > lower count.
    pub fn render(&self, id: u32, tags: &TagList) -> Result<String, InvalidIdError> {
        let tags = self.filter(id, tags)?;
        Ok(format!(
            "{}{}{} {}",
            self.prefix,
            self.separator,
            id,
            tags.filename_fragment()
        ))
    }

    /// The same filtering as [`NameGenerator::render`],
    /// returned as a new tag list instead of a rendered name.
    /// The caller's list is never mutated.
    pub fn filter(&self, id: u32, tags: &TagList) -> Result<TagList, InvalidIdError> {
        if id == 0 {
            return Err(InvalidIdError);
        }
        if tags.is_empty() {
            let mut ret = TagList::new();
            ret.push(Tag::tagme());
            return Ok(ret);
        }
        Ok(self.filter_tags(id, tags))
    }

    fn filter_tags(&self, id: u32, tags: &TagList) -> TagList {
        let see_source = Tag::see_source();
        let mut has_see_source = tags.contains(&see_source);

        // Alias resolution works on a copy.
        let resolved = tags
            .iter()
            .map(|tag| terminal_alias(tag).clone())
            .collect::<Vec<_>>();

        let mut kept = TagList::new();
        let mut dropped_illegal = false;
        for tag in resolved {
            if has_illegal_chars(tag.name()) {
                dropped_illegal = true;
            } else {
                kept.push(tag);
            }
        }
        if dropped_illegal && !has_see_source {
            kept.push(see_source.clone());
            has_see_source = true;
        }

        while self.candidate_len(id, &kept) > self.max_len {
            match least_important(&kept, removal_order) {
                Some(index) => {
                    kept.remove(index);
                    if !has_see_source {
                        kept.push(see_source.clone());
                        has_see_source = true;
                    }
                }
                // Only pinned sentinels remain; nothing more can go.
                None => break,
            }
        }
        kept
    }

    /// Length the final file name would have,
    /// always modeling the longest supported extension.
    fn candidate_len(&self, id: u32, tags: &TagList) -> usize {
        self.prefix.len()
            + self.separator.len()
            + digit_count(id)
            + 1
            + LONGEST_EXT.len()
            + tags.filename_fragment().len()
    }
}

/// Removal policy for truncation:
/// category precedence first,
/// count breaks ties within a category.
pub fn removal_order(a: &Tag, b: &Tag) -> Ordering {
    a.category()
        .precedence()
        .cmp(&b.category().precedence())
        .then_with(|| Tag::by_count(a, b))
}

/// Index of the least important removable tag,
/// or `None` when only pinned sentinels remain.
/// Ties keep the earliest candidate.
fn least_important<F>(tags: &TagList, order: F) -> Option<usize>
where
    F: Fn(&Tag, &Tag) -> Ordering,
{
    let tagme = Tag::tagme();
    let see_source = Tag::see_source();
    tags.iter()
        .enumerate()
        .filter(|(_, tag)| **tag != tagme && **tag != see_source)
        .min_by(|(_, a), (_, b)| order(*a, *b))
        .map(|(index, _)| index)
}

/// Walk `tag`'s alias chain to its terminal record.
fn terminal_alias(tag: &Tag) -> &Tag {
    let mut current = tag;
    for _ in 0..ALIAS_HOP_LIMIT {
        match current.alias() {
            Some(alias) => current = alias,
            None => break,
        }
    }
    current
}

fn digit_count(id: u32) -> usize {
    debug_assert!(id > 0);
    id.ilog10() as usize + 1
}
