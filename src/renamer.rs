use crate::{ImageDirectory, NameGenerator, TagSource};

/// Outcome of a directory pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenameSummary {
    pub renamed: usize,
    pub skipped: usize,
}

#[derive(Debug)]
pub struct RenamerBuilder<S> {
    source: S,
    generator: NameGenerator,
    dry_run: bool,
    verbose: bool,
}

impl<S> RenamerBuilder<S> {
    pub fn new(source: S, generator: NameGenerator) -> RenamerBuilder<S> {
        RenamerBuilder {
            source,
            generator,
            dry_run: false,
            verbose: false,
        }
    }

    /// Report what would happen without touching any file.
    pub fn dry_run(mut self, value: bool) -> Self {
        self.dry_run = value;
        self
    }

    /// Print each rename as it happens.
    pub fn verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    pub fn build(self) -> Renamer<S> {
        Renamer {
            source: self.source,
            generator: self.generator,
            dry_run: self.dry_run,
            verbose: self.verbose,
        }
    }
}

/// The scan → fetch → generate → rename loop,
/// one directory at a time.
#[derive(Debug)]
pub struct Renamer<S> {
    source: S,
    generator: NameGenerator,
    dry_run: bool,
    verbose: bool,
}

impl<S> Renamer<S>
where
    S: TagSource,
{
    /// Rename every recognized image under `dir`
    /// after the tags its source reports.
    ///
    /// The generator's budget is shrunk to what the directory leaves
    /// under the path ceiling.
    /// A file whose tags cannot be fetched
    /// or whose rename fails
    /// is reported and skipped;
    /// nothing is retried.
    pub fn rename_all(&mut self, dir: &ImageDirectory) -> std::io::Result<RenameSummary> {
        self.generator.set_max_len(dir.name_budget());
        let mut summary = RenameSummary::default();
        for mut image in dir.images()? {
            let tags = match self.source.tags_by_id(image.id()) {
                Ok(tags) => tags,
                Err(e) => {
                    eprintln!("skipping `{}`: {e}", image.path().display());
                    summary.skipped += 1;
                    continue;
                }
            };
            // Scanned ids are always positive, so render cannot fail.
            let Ok(name) = self.generator.render(image.id(), &tags) else {
                summary.skipped += 1;
                continue;
            };
            if self.verbose {
                println!("{} -> {name}", image.path().display());
            }
            if self.dry_run {
                summary.renamed += 1;
                continue;
            }
            match image.rename(&name) {
                Ok(()) => summary.renamed += 1,
                Err(e) => {
                    eprintln!("skipping `{}`: {e}", image.path().display());
                    summary.skipped += 1;
                }
            }
        }
        Ok(summary)
    }

    /// The source,
    /// so callers can persist its cache after a pass.
    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use crate::{testing::*, Category, FetchError, Source, Tag, TagList};

    use super::*;

    /// In-memory source: a fixed id → tags table.
    struct StubSource {
        posts: Vec<(u32, TagList)>,
        cache: crate::TagCache,
    }

    impl StubSource {
        fn new<I>(posts: I) -> StubSource
        where
            I: IntoIterator<Item = (u32, TagList)>,
        {
            StubSource {
                posts: posts.into_iter().collect(),
                cache: crate::TagCache::new(),
            }
        }
    }

    impl TagSource for StubSource {
        fn tags_by_id(&mut self, id: u32) -> Result<TagList, FetchError> {
            self.posts
                .iter()
                .find(|(post_id, _)| *post_id == id)
                .map(|(_, tags)| tags.clone())
                .ok_or_else(|| FetchError::Failed {
                    site: "stub".to_owned(),
                    message: format!("no post {id}"),
                })
        }

        fn tags_by_md5(&mut self, _md5: &str) -> Result<TagList, FetchError> {
            Err(FetchError::Unsupported {
                site: "stub".to_owned(),
                operation: "lookup by content hash",
            })
        }

        fn cached_tags(&self) -> TagList {
            self.cache.to_list()
        }

        fn merge_cache(&mut self, tags: &[Tag]) {
            self.cache.merge(tags.iter().cloned());
        }
    }

    #[test]
    fn rename_all_renames_recognized_images() {
        with_temp_dir(|dir| {
            create_file(dir, "Konachan.com - 1.png");
            create_file(dir, "Konachan.com - 2.jpeg");
            let source = StubSource::new([
                (
                    1,
                    [tag_with(10, "blue eyes", 500, Category::General)]
                        .into_iter()
                        .collect(),
                ),
                (2, TagList::new()),
            ]);
            let mut renamer =
                RenamerBuilder::new(source, NameGenerator::konachan()).build();
            let scanned = ImageDirectory::new(dir, Source::Konachan).unwrap();

            let summary = renamer.rename_all(&scanned).unwrap();
            assert_eq!(
                summary,
                RenameSummary {
                    renamed: 2,
                    skipped: 0
                }
            );
            assert!(dir.join("Konachan.com - 1 blue_eyes.png").is_file());
            assert!(dir.join("Konachan.com - 2 tagme.jpeg").is_file());
        });
    }

    #[test]
    fn rename_all_skips_files_the_source_does_not_know() {
        with_temp_dir(|dir| {
            create_file(dir, "Konachan.com - 9.png");
            let source = StubSource::new([]);
            let mut renamer =
                RenamerBuilder::new(source, NameGenerator::konachan()).build();
            let scanned = ImageDirectory::new(dir, Source::Konachan).unwrap();

            let summary = renamer.rename_all(&scanned).unwrap();
            assert_eq!(
                summary,
                RenameSummary {
                    renamed: 0,
                    skipped: 1
                }
            );
            assert!(dir.join("Konachan.com - 9.png").is_file());
        });
    }

    #[test]
    fn dry_run_reports_without_touching_files() {
        with_temp_dir(|dir| {
            create_file(dir, "Konachan.com - 1.png");
            let source = StubSource::new([(1, TagList::new())]);
            let mut renamer = RenamerBuilder::new(source, NameGenerator::konachan())
                .dry_run(true)
                .build();
            let scanned = ImageDirectory::new(dir, Source::Konachan).unwrap();

            let summary = renamer.rename_all(&scanned).unwrap();
            assert_eq!(summary.renamed, 1);
            assert!(dir.join("Konachan.com - 1.png").is_file());
        });
    }
}
