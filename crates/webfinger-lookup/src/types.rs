use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::JrdError;
use crate::relations::Category;

/// RFC 7033 JSON Resource Descriptor.
///
/// Members this type does not name are kept in `extra`, so a JRD
/// re-serializes with every field it arrived with.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Jrd {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Option<String>>>,
    #[serde(default)]
    pub links: Vec<Link>,
    /// Some servers answer 200 with an `error` member instead of a JRD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A link in a JRD.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub rel: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titles: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Option<String>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A JRD together with the index built from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexedJrd {
    pub raw: Jrd,
    pub index: JrdIndex,
}

/// Known links grouped by category, plus the display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JrdIndex {
    pub display_name: Option<String>,
    /// Every category is present; unmatched ones hold an empty list.
    pub links: BTreeMap<Category, Vec<Link>>,
}

impl JrdIndex {
    /// An index with every category present and empty.
    pub fn empty() -> Self {
        Self {
            display_name: None,
            links: Category::ALL
                .into_iter()
                .map(|category| (category, Vec::new()))
                .collect(),
        }
    }

    /// Links indexed under `category`, in source order.
    pub fn links(&self, category: Category) -> &[Link] {
        self.links
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl IndexedJrd {
    pub fn links(&self, category: Category) -> &[Link] {
        self.index.links(category)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.index.display_name.as_deref()
    }
}

/// Parse a JSON value as a JRD.
///
/// Only the top-level shape is checked. A member whose value does not fit
/// its typed field is kept verbatim in `extra` instead, and a link without
/// a string `rel` is skipped, so one off-model member never costs the
/// rest of the document.
///
/// # Errors
/// Returns `JrdError::NotAnObject` if the value is not a JSON object.
pub fn parse_jrd(json: &Value) -> Result<Jrd, JrdError> {
    let Value::Object(members) = json else {
        return Err(JrdError::NotAnObject);
    };

    let mut jrd = Jrd::default();
    for (key, value) in members {
        match key.as_str() {
            "subject" => jrd.subject = typed(key, value, &mut jrd.extra),
            "aliases" => jrd.aliases = typed(key, value, &mut jrd.extra),
            "properties" => jrd.properties = typed(key, value, &mut jrd.extra),
            "error" => jrd.error = typed(key, value, &mut jrd.extra),
            "links" => match value {
                Value::Array(links) => {
                    jrd.links = links.iter().filter_map(parse_link).collect();
                }
                _ => {
                    tracing::debug!(member = "links", "JRD links is not an array");
                    jrd.extra.insert(key.clone(), value.clone());
                }
            },
            _ => {
                jrd.extra.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(jrd)
}

fn parse_link(value: &Value) -> Option<Link> {
    let Some(rel) = value.get("rel").and_then(Value::as_str) else {
        tracing::debug!(link = %value, "skipping JRD link without a string rel");
        return None;
    };
    let members = value.as_object()?;

    let mut link = Link {
        rel: rel.to_string(),
        ..Link::default()
    };
    for (key, value) in members {
        match key.as_str() {
            "rel" => {}
            "type" => link.media_type = typed(key, value, &mut link.extra),
            "href" => link.href = typed(key, value, &mut link.extra),
            "titles" => link.titles = typed(key, value, &mut link.extra),
            "properties" => link.properties = typed(key, value, &mut link.extra),
            _ => {
                link.extra.insert(key.clone(), value.clone());
            }
        }
    }
    Some(link)
}

/// Deserialize one member into its typed field, or park it in `extra`.
fn typed<T: DeserializeOwned>(
    key: &str,
    value: &Value,
    extra: &mut Map<String, Value>,
) -> Option<T> {
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            tracing::debug!(member = key, %error, "keeping off-model JRD member untyped");
            extra.insert(key.to_string(), value.clone());
            None
        }
    }
}
