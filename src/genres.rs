//! Macro-genre classification.
//!
//! Spotify reports fine-grained genre tags per artist ("dark trap",
//! "australian indie rock", ...). This module buckets those tags into a small
//! closed set of macro-genres by first-match substring lookup against an
//! explicitly ordered keyword table.
//!
//! The table order is part of the contract: a tag like "indie pop" contains
//! both a Pop and a Rock keyword, and the winner is whichever pair appears
//! first in [`GENRE_KEYWORDS`]. Keeping the table an ordered slice (instead
//! of a hash map) makes that outcome deterministic and testable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse genre bucket derived from one or more fine-grained genre tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MacroGenre {
    HipHop,
    Electronic,
    Pop,
    Rock,
    Classical,
    Jazz,
    Latin,
    RnbSoul,
    Country,
    Folk,
    Reggae,
    Blues,
    World,
    Other,
    Unknown,
}

impl MacroGenre {
    /// English display label.
    pub fn label(&self) -> &'static str {
        match self {
            MacroGenre::HipHop => "Hip-Hop",
            MacroGenre::Electronic => "Electronic",
            MacroGenre::Pop => "Pop",
            MacroGenre::Rock => "Rock",
            MacroGenre::Classical => "Classical",
            MacroGenre::Jazz => "Jazz",
            MacroGenre::Latin => "Latin",
            MacroGenre::RnbSoul => "R&B / Soul",
            MacroGenre::Country => "Country",
            MacroGenre::Folk => "Folk",
            MacroGenre::Reggae => "Reggae",
            MacroGenre::Blues => "Blues",
            MacroGenre::World => "World",
            MacroGenre::Other => "Other",
            MacroGenre::Unknown => "Unknown",
        }
    }

    /// Spanish display label.
    pub fn label_es(&self) -> &'static str {
        match self {
            MacroGenre::Electronic => "Electrónica",
            MacroGenre::Classical => "Clásica",
            MacroGenre::Latin => "Latina",
            MacroGenre::World => "Música del Mundo",
            MacroGenre::Other => "Otros",
            MacroGenre::Unknown => "Desconocido",
            other => other.label(),
        }
    }

    /// Parses a display label back into a macro-genre (case-insensitive).
    pub fn from_label(label: &str) -> Option<MacroGenre> {
        let needle = label.trim().to_lowercase();
        ALL_GENRES
            .iter()
            .copied()
            .find(|g| g.label().to_lowercase() == needle)
    }
}

impl fmt::Display for MacroGenre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Every macro-genre, in table order.
pub const ALL_GENRES: &[MacroGenre] = &[
    MacroGenre::HipHop,
    MacroGenre::Electronic,
    MacroGenre::Pop,
    MacroGenre::Rock,
    MacroGenre::Classical,
    MacroGenre::Jazz,
    MacroGenre::Latin,
    MacroGenre::RnbSoul,
    MacroGenre::Country,
    MacroGenre::Folk,
    MacroGenre::Reggae,
    MacroGenre::Blues,
    MacroGenre::World,
    MacroGenre::Other,
    MacroGenre::Unknown,
];

/// Ordered keyword table. Lookup walks this slice top to bottom and the
/// first keyword contained in a genre tag wins.
pub const GENRE_KEYWORDS: &[(&str, MacroGenre)] = &[
    // Hip-Hop
    ("rap", MacroGenre::HipHop),
    ("hip hop", MacroGenre::HipHop),
    ("hip-hop", MacroGenre::HipHop),
    ("trap", MacroGenre::HipHop),
    ("drill", MacroGenre::HipHop),
    ("boom bap", MacroGenre::HipHop),
    ("lo-fi", MacroGenre::HipHop),
    ("grime", MacroGenre::HipHop),
    // Electronic
    ("house", MacroGenre::Electronic),
    ("techno", MacroGenre::Electronic),
    ("electro", MacroGenre::Electronic),
    ("edm", MacroGenre::Electronic),
    ("dubstep", MacroGenre::Electronic),
    ("drum and bass", MacroGenre::Electronic),
    ("dnb", MacroGenre::Electronic),
    ("trance", MacroGenre::Electronic),
    ("hardstyle", MacroGenre::Electronic),
    ("ambient", MacroGenre::Electronic),
    ("idm", MacroGenre::Electronic),
    ("future bass", MacroGenre::Electronic),
    ("synthwave", MacroGenre::Electronic),
    ("chillstep", MacroGenre::Electronic),
    // Pop
    ("pop", MacroGenre::Pop),
    // Rock
    ("rock", MacroGenre::Rock),
    ("alternative", MacroGenre::Rock),
    ("indie", MacroGenre::Rock),
    ("punk", MacroGenre::Rock),
    ("grunge", MacroGenre::Rock),
    ("metal", MacroGenre::Rock),
    ("emo", MacroGenre::Rock),
    // Classical
    ("classical", MacroGenre::Classical),
    ("baroque", MacroGenre::Classical),
    ("opera", MacroGenre::Classical),
    ("symphonic", MacroGenre::Classical),
    ("chamber music", MacroGenre::Classical),
    // Jazz
    ("jazz", MacroGenre::Jazz),
    ("bebop", MacroGenre::Jazz),
    ("swing", MacroGenre::Jazz),
    ("fusion", MacroGenre::Jazz),
    // Latin
    ("latin", MacroGenre::Latin),
    ("reggaeton", MacroGenre::Latin),
    ("salsa", MacroGenre::Latin),
    ("bachata", MacroGenre::Latin),
    ("merengue", MacroGenre::Latin),
    ("cumbia", MacroGenre::Latin),
    ("tango", MacroGenre::Latin),
    // R&B / Soul
    ("r&b", MacroGenre::RnbSoul),
    ("soul", MacroGenre::RnbSoul),
    ("funk", MacroGenre::RnbSoul),
    ("motown", MacroGenre::RnbSoul),
    // Country
    ("country", MacroGenre::Country),
    ("bluegrass", MacroGenre::Country),
    ("honky tonk", MacroGenre::Country),
    ("americana", MacroGenre::Country),
    // Folk
    ("folk", MacroGenre::Folk),
    ("celtic", MacroGenre::Folk),
    // Reggae
    ("reggae", MacroGenre::Reggae),
    ("dancehall", MacroGenre::Reggae),
    ("ska", MacroGenre::Reggae),
    ("dub", MacroGenre::Reggae),
    // Blues
    ("blues", MacroGenre::Blues),
    // World
    ("afrobeat", MacroGenre::World),
    ("afropop", MacroGenre::World),
    ("klezmer", MacroGenre::World),
    ("flamenco", MacroGenre::World),
    ("bhangra", MacroGenre::World),
    // Other / catch-all
    ("soundtrack", MacroGenre::Other),
    ("musical", MacroGenre::Other),
    ("spoken word", MacroGenre::Other),
    ("experimental", MacroGenre::Other),
];

/// Classifies a list of fine-grained genre tags into one macro-genre.
///
/// Walks the tags in order; for each tag, tests case-insensitive substring
/// containment against [`GENRE_KEYWORDS`] in table order. The first match in
/// the first matching tag wins. Empty input, the `["Unknown"]` cache
/// sentinel, or tags that match nothing all yield [`MacroGenre::Unknown`].
pub fn classify<S: AsRef<str>>(genres: &[S]) -> MacroGenre {
    for genre in genres {
        let simplified = genre.as_ref().to_lowercase();
        for (keyword, macro_genre) in GENRE_KEYWORDS {
            if simplified.contains(keyword) {
                return *macro_genre;
            }
        }
    }
    MacroGenre::Unknown
}
