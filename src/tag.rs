use std::{cmp::Ordering, fmt, str::FromStr};

use derive_more::Display;

/// Origin reserved for the synthetic tags the generator injects.
/// No booru uses it,
/// so the sentinels never collide with fetched data.
pub(crate) const SENTINEL_ORIGIN: &str = "builtin";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("id must be greater than 0")]
    Id,
    #[error("count must be greater than 0")]
    Count,
    #[error("origin cannot be empty")]
    Origin,
    #[error("name cannot be empty")]
    Name,
    #[error("`{0}` is not a tag category")]
    Category(String),
    #[error("`{0}` contains no usable digits")]
    Digits(String),
}

/// The six tag kinds shared by danbooru/moebooru-style sites.
/// Sites that do not follow the convention still map onto a subset of these.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum Category {
    /// Generic descriptors: eye color, clothing, and so on.
    #[display(fmt = "general")]
    General,
    /// Scan defects: jpeg artifacts, crease, scanning dust.
    /// What counts as a fault varies between sites.
    #[display(fmt = "faults")]
    Faults,
    /// The artist circle, when one applies.
    #[display(fmt = "circle")]
    Circle,
    /// Characters appearing in the image.
    #[display(fmt = "character")]
    Character,
    /// The work the image is from.
    /// Most sites use `original` when there is none.
    #[display(fmt = "copyright")]
    Copyright,
    /// The artist(s) responsible for the image.
    #[display(fmt = "artist")]
    Artist,
}

impl Category {
    /// Rank used when deciding which tags to drop first.
    /// Higher means more important, kept longer.
    pub fn precedence(self) -> u8 {
        match self {
            Category::General => 0,
            Category::Faults => 1,
            Category::Circle => 2,
            Category::Character => 3,
            Category::Copyright => 4,
            Category::Artist => 5,
        }
    }
}

impl FromStr for Category {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Category::General),
            "faults" => Ok(Category::Faults),
            "circle" => Ok(Category::Circle),
            "character" => Ok(Category::Character),
            "copyright" => Ok(Category::Copyright),
            "artist" => Ok(Category::Artist),
            _ => Err(TagError::Category(s.to_owned())),
        }
    }
}

/// One tag as known by its booru of origin.
///
/// `id` and `count` come from the origin
/// and are required to detect duplicates
/// and to rank tags when a generated name must shrink.
/// `name` may contain spaces and characters illegal in file names;
/// they are substituted at rendering time,
/// not here.
///
/// The alias,
/// when present,
/// is the preferred equivalent this tag should be replaced with.
/// It is an owned value:
/// attaching one snapshots the record,
/// so later changes to the source tag never leak into the holder.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tag {
    id: u32,
    origin: String,
    name: String,
    count: u32,
    category: Category,
    alias: Option<Box<Tag>>,
}

impl Tag {
    /// Every field is validated;
    /// no invalid `Tag` can be constructed.
    pub fn new<S, N>(
        id: u32,
        origin: S,
        name: N,
        count: u32,
        category: Category,
        alias: Option<Tag>,
    ) -> Result<Tag, TagError>
    where
        S: Into<String>,
        N: Into<String>,
    {
        let mut tag = Tag {
            id: 1,
            origin: String::new(),
            name: String::new(),
            count: 1,
            category,
            alias: None,
        };
        tag.set_id(id)?;
        tag.set_origin(origin)?;
        tag.set_name(name)?;
        tag.set_count(count)?;
        tag.set_alias(alias);
        Ok(tag)
    }

    /// Stand-in for an image with no tags at all.
    /// The maximal count keeps it out of reach of truncation.
    pub fn tagme() -> Tag {
        Tag {
            id: u32::MAX,
            origin: SENTINEL_ORIGIN.to_owned(),
            name: "tagme".to_owned(),
            count: u32::MAX,
            category: Category::General,
            alias: None,
        }
    }

    /// Marker that tags were dropped from a generated name
    /// and should be fetched again from the origin.
    /// The maximal count keeps it out of reach of truncation.
    pub fn see_source() -> Tag {
        Tag {
            id: u32::MAX - 1,
            origin: SENTINEL_ORIGIN.to_owned(),
            name: "see source".to_owned(),
            count: u32::MAX,
            category: Category::Faults,
            alias: None,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The preferred equivalent of this tag,
    /// if one is known.
    pub fn alias(&self) -> Option<&Tag> {
        self.alias.as_deref()
    }

    pub fn set_id(&mut self, id: u32) -> Result<(), TagError> {
        if id == 0 {
            return Err(TagError::Id);
        }
        self.id = id;
        Ok(())
    }

    /// Set the id from text.
    /// Non-digit characters are discarded before parsing,
    /// so `"id:123"` reads as `123`.
    pub fn set_id_str(&mut self, s: &str) -> Result<(), TagError> {
        self.set_id(digits_of(s)?)
    }

    pub fn set_origin<S>(&mut self, origin: S) -> Result<(), TagError>
    where
        S: Into<String>,
    {
        let origin = origin.into();
        if origin.is_empty() {
            return Err(TagError::Origin);
        }
        self.origin = origin;
        Ok(())
    }

    pub fn set_name<S>(&mut self, name: S) -> Result<(), TagError>
    where
        S: Into<String>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(TagError::Name);
        }
        self.name = name;
        Ok(())
    }

    pub fn set_count(&mut self, count: u32) -> Result<(), TagError> {
        if count == 0 {
            return Err(TagError::Count);
        }
        self.count = count;
        Ok(())
    }

    /// Set the count from text,
    /// with the same digit-stripping as [`Tag::set_id_str`].
    pub fn set_count_str(&mut self, s: &str) -> Result<(), TagError> {
        self.set_count(digits_of(s)?)
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn set_category_str(&mut self, s: &str) -> Result<(), TagError> {
        self.category = s.parse()?;
        Ok(())
    }

    /// The given tag is stored by value;
    /// the caller keeps its own copy.
    pub fn set_alias(&mut self, alias: Option<Tag>) {
        self.alias = alias.map(Box::new);
    }

    /// Set the alias from its encoded form.
    /// The literal `null` clears it.
    pub fn set_alias_str(&mut self, s: &str) -> Result<(), ParseTagError> {
        self.alias = match s {
            "null" => None,
            _ => Some(Box::new(s.parse()?)),
        };
        Ok(())
    }

    /// Order by origin id.
    pub fn by_id(a: &Tag, b: &Tag) -> Ordering {
        a.id.cmp(&b.id)
    }

    /// Order by name, lexicographic.
    pub fn by_name(a: &Tag, b: &Tag) -> Ordering {
        a.name.cmp(&b.name)
    }

    /// Order by ascending popularity.
    pub fn by_count(a: &Tag, b: &Tag) -> Ordering {
        a.count.cmp(&b.count)
    }
}

fn digits_of(s: &str) -> Result<u32, TagError> {
    s.chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .map_err(|_| TagError::Digits(s.to_owned()))
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseTagError {
    #[error("record is not brace-wrapped")]
    Braces,
    #[error("expected 6 tab-separated fields, found {0}")]
    FieldCount(usize),
    #[error(transparent)]
    Field(#[from] TagError),
}

/// A tag encodes as one brace-wrapped, tab-delimited line:
/// `{id\torigin\tname\tcount\tcategory\talias}`,
/// where the alias recursively encodes in the same form,
/// or as the literal `null`.
/// This is the record format tag stores persist,
/// not a display name;
/// for file names see [`TagList::filename_fragment`](crate::TagList::filename_fragment).
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}\t{}\t{}\t{}\t{}\t",
            self.id, self.origin, self.name, self.count, self.category
        )?;
        match &self.alias {
            Some(alias) => write!(f, "{alias}}}"),
            None => write!(f, "null}}"),
        }
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or(ParseTagError::Braces)?;
        // The alias field may itself contain tabs,
        // so the split is capped at 6.
        let fields = body.splitn(6, '\t').collect::<Vec<_>>();
        if fields.len() != 6 {
            return Err(ParseTagError::FieldCount(fields.len()));
        }
        let mut tag = Tag::tagme();
        tag.set_id_str(fields[0])?;
        tag.set_origin(fields[1])?;
        tag.set_name(fields[2])?;
        tag.set_count_str(fields[3])?;
        tag.set_category_str(fields[4])?;
        tag.set_alias_str(fields[5])?;
        Ok(tag)
    }
}
