//! Known link relations and the categories they are indexed under.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Property holding the subject's display name.
pub const NAME_PROPERTY: &str = "http://packetizer.com/ns/name";

/// Canonical bucket for a family of link relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Webfist,
    Avatar,
    Remotestorage,
    Share,
    Profile,
    Vcard,
    Blog,
    Updates,
    Camlistore,
}

/// Relation URI or token → category. Lookups are exact and case-sensitive.
pub const RELATIONS: &[(&str, Category)] = &[
    ("http://webfist.org/spec/rel", Category::Webfist),
    ("http://webfinger.net/rel/avatar", Category::Avatar),
    ("remotestorage", Category::Remotestorage),
    ("remoteStorage", Category::Remotestorage),
    (
        "http://tools.ietf.org/id/draft-dejong-remotestorage",
        Category::Remotestorage,
    ),
    ("http://www.packetizer.com/rel/share", Category::Share),
    ("http://webfinger.net/rel/profile-page", Category::Profile),
    ("me", Category::Profile),
    ("vcard", Category::Vcard),
    ("blog", Category::Blog),
    ("http://packetizer.com/rel/blog", Category::Blog),
    (
        "http://schemas.google.com/g/2010#updates-from",
        Category::Updates,
    ),
    ("https://camlistore.org/rel/server", Category::Camlistore),
];

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Webfist,
        Category::Avatar,
        Category::Remotestorage,
        Category::Share,
        Category::Profile,
        Category::Vcard,
        Category::Blog,
        Category::Updates,
        Category::Camlistore,
    ];

    /// Category a link relation is indexed under, if it is a known one.
    pub fn from_rel(rel: &str) -> Option<Category> {
        RELATIONS
            .iter()
            .find(|(known, _)| *known == rel)
            .map(|(_, category)| *category)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Webfist => "webfist",
            Category::Avatar => "avatar",
            Category::Remotestorage => "remotestorage",
            Category::Share => "share",
            Category::Profile => "profile",
            Category::Vcard => "vcard",
            Category::Blog => "blog",
            Category::Updates => "updates",
            Category::Camlistore => "camlistore",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category name outside the nine known ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
