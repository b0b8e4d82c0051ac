use std::path::PathBuf;

use anyhow::Context;
use booru_rename::{ImageDirectory, Source, TagCache, TagList, TagStore};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Rename booru images after their tags", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the ids recovered from image files under a directory
    ///
    /// Files whose name does not match the source's pattern
    /// are skipped silently.
    Ids {
        /// Site the images were downloaded from
        #[arg(long, short, value_parser = source_parser)]
        source: Source,

        /// Directory to scan
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },
    /// Generate a file name for an image from stored tag info
    Name {
        /// Site the image belongs to
        #[arg(long, short, value_parser = source_parser)]
        source: Source,

        /// Image id on the site
        #[arg(long)]
        id: u32,

        /// Tag file written by a previous run
        #[arg(long, value_name = "FILE")]
        tags: PathBuf,

        /// Length budget for the generated name
        #[arg(long)]
        max_len: Option<usize>,

        /// Names of the image's tags
        #[arg(value_name = "TAG", required = true)]
        names: Vec<String>,
    },
    /// Print the records stored in a tag file
    Tags {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn source_parser(s: &str) -> Result<Source, String> {
    s.parse().map_err(|e: booru_rename::SourceError| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Ids { source, dir } => {
            let dir = ImageDirectory::new(dir, source)?;
            for image in dir.images()? {
                println!("{image}");
            }
        }
        Commands::Name {
            source,
            id,
            tags,
            max_len,
            names,
        } => {
            let cache: TagCache = TagStore::new(&tags)
                .load()
                .with_context(|| format!("loading tags from `{}`", tags.display()))?
                .into_iter()
                .collect();
            let mut generator = source.name_generator();
            if let Some(max_len) = max_len {
                let actual = generator.set_max_len(max_len);
                if actual != max_len {
                    eprintln!("budget {max_len} out of range, using {actual}");
                }
            }
            let mut list = TagList::new();
            for name in names {
                match cache.get_by_name(&name) {
                    Some(tag) => list.push(tag.clone()),
                    None => eprintln!("no stored tag named `{name}`, skipping"),
                }
            }
            println!("{}", generator.render(id, &list)?);
        }
        Commands::Tags { file } => {
            let tags = TagStore::new(&file)
                .load()
                .with_context(|| format!("loading tags from `{}`", file.display()))?;
            for tag in &tags {
                println!("{tag}");
            }
        }
    }

    Ok(())
}
