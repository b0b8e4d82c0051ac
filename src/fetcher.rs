use std::collections::BTreeMap;

use crate::{Tag, TagList};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("`{site}` does not support {operation}")]
    Unsupported {
        site: String,
        operation: &'static str,
    },
    #[error("`{site}` failed: {message}")]
    Failed { site: String, message: String },
}

/// Where an image's tags come from.
///
/// Implementations scrape or query their site however they like;
/// the engine depends only on the returned [`TagList`] shape.
/// Detailed tag info is slow to obtain,
/// so sources keep a cache of tags already seen,
/// expose a copy of it,
/// and accept records merged in from external storage.
///
/// Retry and backoff toward the remote site
/// belong to the implementation,
/// never to callers.
pub trait TagSource {
    /// All tags of the post with this id.
    fn tags_by_id(&mut self, id: u32) -> Result<TagList, FetchError>;

    /// All tags of the post with this content hash.
    /// Not every site can look posts up this way.
    fn tags_by_md5(&mut self, md5: &str) -> Result<TagList, FetchError>;

    /// A copy of every tag this source has detailed info for.
    fn cached_tags(&self) -> TagList;

    /// Seed the cache,
    /// typically from a [`TagStore`](crate::TagStore) load.
    fn merge_cache(&mut self, tags: &[Tag]);
}

/// Detailed tag info keyed for the two lookups fetchers need:
/// by origin id and by name.
#[derive(Debug, Clone, Default)]
pub struct TagCache {
    by_id: BTreeMap<u32, Tag>,
    ids_by_name: BTreeMap<String, u32>,
}

impl TagCache {
    pub fn new() -> TagCache {
        TagCache::default()
    }

    /// Insert or replace by id.
    /// A replaced record's old name stops resolving.
    pub fn insert(&mut self, tag: Tag) {
        if let Some(old) = self.by_id.get(&tag.id()) {
            if old.name() != tag.name() {
                self.ids_by_name.remove(old.name());
            }
        }
        self.ids_by_name.insert(tag.name().to_owned(), tag.id());
        self.by_id.insert(tag.id(), tag);
    }

    pub fn merge<I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = Tag>,
    {
        for tag in tags {
            self.insert(tag);
        }
    }

    pub fn get(&self, id: u32) -> Option<&Tag> {
        self.by_id.get(&id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Tag> {
        self.by_id.get(self.ids_by_name.get(name)?)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Cached tags in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.by_id.values()
    }

    /// A copy of the cache as a list,
    /// the shape stores persist.
    pub fn to_list(&self) -> TagList {
        self.iter().cloned().collect()
    }
}

impl FromIterator<Tag> for TagCache {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut cache = TagCache::new();
        cache.merge(iter);
        cache
    }
}

#[cfg(test)]
mod tests {
    use crate::{testing::*, Category};

    use super::*;

    #[test]
    fn lookups_work_by_id_and_by_name() {
        let cache: TagCache = [
            tag_with(10, "blue eyes", 500, Category::General),
            tag_with(20, "misaki kurehito", 10, Category::Artist),
        ]
        .into_iter()
        .collect();
        assert_eq!(cache.get(20).unwrap().name(), "misaki kurehito");
        assert_eq!(cache.get_by_name("blue eyes").unwrap().id(), 10);
        assert!(cache.get(30).is_none());
        assert!(cache.get_by_name("long hair").is_none());
    }

    #[test]
    fn insert_replaces_by_id_and_drops_the_stale_name() {
        let mut cache = TagCache::new();
        cache.insert(tag_with(10, "blue eyes", 500, Category::General));
        cache.insert(tag_with(10, "blue_eyes", 501, Category::General));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(10).unwrap().count(), 501);
        assert!(cache.get_by_name("blue eyes").is_none());
        assert_eq!(cache.get_by_name("blue_eyes").unwrap().id(), 10);
    }

    #[test]
    fn to_list_returns_tags_in_id_order() {
        let cache: TagCache = [
            tag_with(20, "misaki kurehito", 10, Category::Artist),
            tag_with(10, "blue eyes", 500, Category::General),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            cache
                .to_list()
                .iter()
                .map(|tag| tag.id())
                .collect::<Vec<_>>(),
            [10, 20]
        );
    }
}
