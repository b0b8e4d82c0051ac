use std::{fmt, str::FromStr, sync::OnceLock};

use regex::Regex;

use crate::NameGenerator;

/// An image-board site this tool knows how to read file names from.
///
/// Each source pairs an id-extraction strategy
/// with the name-generator profile matching the site's naming convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Konachan,
    Yandere,
    Eshuushuu,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a known source; expected `konachan`, `yandere`, or `eshuushuu`")]
pub struct SourceError(String);

impl Source {
    /// Recover the image id from a downloaded file's name.
    /// Returns `None` when the name does not match the source's pattern,
    /// so callers can filter unrecognized files silently.
    pub fn extract_id(self, filename: &str) -> Option<u32> {
        match self {
            Source::Konachan => konachan_id(filename),
            Source::Yandere => yandere_id(filename),
            Source::Eshuushuu => eshuushuu_id(filename),
        }
    }

    pub fn name_generator(self) -> NameGenerator {
        match self {
            Source::Konachan => NameGenerator::konachan(),
            Source::Yandere => NameGenerator::yandere(),
            Source::Eshuushuu => NameGenerator::eshuushuu(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Konachan => write!(f, "konachan"),
            Source::Yandere => write!(f, "yandere"),
            Source::Eshuushuu => write!(f, "eshuushuu"),
        }
    }
}

impl FromStr for Source {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "konachan" => Ok(Source::Konachan),
            "yandere" | "yande.re" => Ok(Source::Yandere),
            "eshuushuu" | "e-shuushuu" => Ok(Source::Eshuushuu),
            _ => Err(SourceError(s.to_owned())),
        }
    }
}

/// Id from a Konachan download.
///
/// Wild Konachan names vary a lot:
/// the `Konachan`/`com` header may be joined by `.`, `_`, `-`, or nothing,
/// leading junk may precede it,
/// and browsers sometimes escape spaces to `%20`
/// which later truncates to a bare `20` glued onto the id.
/// The match runs in stages:
/// locate the header,
/// cut at the first character that is neither digit nor `-`,
/// then clean the escaped-space artifacts.
pub fn konachan_id(filename: &str) -> Option<u32> {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    let header = HEADER.get_or_init(|| {
        Regex::new(r"[Kk]onachan[._-]?com[_ -]*[0-9]").expect("header pattern is valid")
    });

    let found = header.find(filename)?;
    // The final character the header matched is the id's first digit.
    let rest = &filename[found.end() - 1..];
    let cut = rest
        .find(|c: char| !c.is_ascii_digit() && c != '-')
        .unwrap_or(rest.len());
    let mut id = &rest[..cut];
    id = id.strip_suffix('-').unwrap_or(id);
    let cleaned;
    if id.contains('-') {
        cleaned = clean_escaped_spaces(id);
        id = &cleaned;
    }
    parse_positive(id)
}

/// `"%20"` escapes truncated to `20` leave ids shaped like `20-20<id>20`.
/// When the exact shape matches, the glued `20`s are cut off both ends;
/// otherwise everything from the `-` on is assumed to be a tag remnant.
fn clean_escaped_spaces(s: &str) -> String {
    static ESCAPED: OnceLock<Regex> = OnceLock::new();
    let escaped = ESCAPED
        .get_or_init(|| Regex::new(r"^20-20[0-9]*20$").expect("escaped pattern is valid"));

    if escaped.is_match(s) {
        s[5..s.len() - 2].to_owned()
    } else {
        s[..s.find('-').unwrap_or(s.len())].to_owned()
    }
}

/// Id from a yande.re download,
/// `"yande.re <id> <tags>.<ext>"`.
pub fn yandere_id(filename: &str) -> Option<u32> {
    let rest = filename.strip_prefix("yande.re")?;
    let rest = rest.trim_start_matches([' ', '_']);
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    parse_positive(&rest[..end])
}

/// Id from an e-shuushuu download,
/// `"yyyy-mm-dd-<id>.<ext>"`:
/// the id sits at a fixed position after the 11-character date header.
pub fn eshuushuu_id(filename: &str) -> Option<u32> {
    if filename.len() < 13 || !filename.contains('.') {
        return None;
    }
    let dot = filename.rfind('.')?;
    parse_positive(filename.get(11..dot)?)
}

fn parse_positive(s: &str) -> Option<u32> {
    let id: u32 = s.parse().ok()?;
    (id > 0).then_some(id)
}
