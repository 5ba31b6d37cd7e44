use crate::relations::{Category, NAME_PROPERTY};
use crate::types::{IndexedJrd, Jrd, JrdIndex};

/// Group a JRD's known links by category and pull out its display name.
///
/// Links with an unrecognized `rel` stay in `raw` but are not indexed.
/// A JRD carrying an `error` member is indexed like any other.
pub fn index(jrd: Jrd) -> IndexedJrd {
    if let Some(error) = jrd.error.as_deref() {
        tracing::warn!(error, subject = ?jrd.subject, "JRD carries an error member");
    }

    let mut index = JrdIndex::empty();

    for link in &jrd.links {
        if let Some(category) = Category::from_rel(&link.rel) {
            index.links.entry(category).or_default().push(link.clone());
        }
    }

    index.display_name = jrd
        .properties
        .as_ref()
        .and_then(|props| props.get(NAME_PROPERTY).cloned().flatten());

    IndexedJrd { raw: jrd, index }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_jrd;
    use serde_json::json;

    fn jrd(value: serde_json::Value) -> Jrd {
        parse_jrd(&value).unwrap()
    }

    #[test]
    fn avatar_link_lands_in_avatar() {
        let result = index(jrd(json!({
            "links": [{ "rel": "http://webfinger.net/rel/avatar", "href": "http://x/a.png" }]
        })));
        let avatars = result.links(Category::Avatar);
        assert_eq!(avatars.len(), 1);
        assert_eq!(avatars[0].href.as_deref(), Some("http://x/a.png"));
    }

    #[test]
    fn unknown_rel_is_not_indexed_but_kept_raw() {
        let result = index(jrd(json!({
            "links": [{ "rel": "unknown-rel", "href": "http://x/y" }]
        })));
        for category in Category::ALL {
            assert!(result.links(category).is_empty(), "{category} not empty");
        }
        assert_eq!(result.raw.links.len(), 1);
    }

    #[test]
    fn every_category_present_for_empty_jrd() {
        let result = index(Jrd::default());
        assert_eq!(result.index.links.len(), 9);
        assert!(result.display_name().is_none());
    }

    #[test]
    fn indexed_links_are_verbatim_copies() {
        let source = json!({
            "links": [
                {
                    "rel": "http://webfinger.net/rel/profile-page",
                    "type": "text/html",
                    "href": "https://example.com/alice",
                    "titles": { "en-us": "Alice's page", "und": "Alice" },
                    "properties": { "http://example.com/ns/role": "owner", "http://example.com/ns/x": null },
                    "x-custom": [1, 2, 3]
                }
            ]
        });
        let result = index(jrd(source.clone()));
        let profile = result.links(Category::Profile);
        assert_eq!(profile.len(), 1);
        assert_eq!(profile[0], result.raw.links[0]);
        assert_eq!(
            serde_json::to_value(&profile[0]).unwrap(),
            source["links"][0]
        );
    }

    #[test]
    fn preserves_source_order_within_category() {
        let result = index(jrd(json!({
            "links": [
                { "rel": "me", "href": "https://a" },
                { "rel": "vcard", "href": "https://card" },
                { "rel": "http://webfinger.net/rel/profile-page", "href": "https://b" },
                { "rel": "me", "href": "https://c" }
            ]
        })));
        let hrefs: Vec<_> = result
            .links(Category::Profile)
            .iter()
            .map(|l| l.href.as_deref().unwrap())
            .collect();
        assert_eq!(hrefs, vec!["https://a", "https://b", "https://c"]);
        assert_eq!(result.links(Category::Vcard).len(), 1);
    }

    #[test]
    fn display_name_from_name_property() {
        let result = index(jrd(json!({
            "properties": { "http://packetizer.com/ns/name": "Paul E. Jones" },
            "links": []
        })));
        assert_eq!(result.display_name(), Some("Paul E. Jones"));
    }

    #[test]
    fn null_name_property_is_no_display_name() {
        let result = index(jrd(json!({
            "properties": { "http://packetizer.com/ns/name": null },
            "links": []
        })));
        assert_eq!(result.display_name(), None);
    }

    #[test]
    fn error_member_does_not_stop_indexing() {
        let result = index(jrd(json!({
            "error": "temporarily unavailable",
            "links": [{ "rel": "blog", "href": "https://blog.example.com" }]
        })));
        assert_eq!(result.raw.error.as_deref(), Some("temporarily unavailable"));
        assert_eq!(result.links(Category::Blog).len(), 1);
    }

    #[test]
    fn separate_calls_do_not_share_lists() {
        let first = index(jrd(json!({ "links": [{ "rel": "me", "href": "https://a" }] })));
        let second = index(jrd(json!({ "links": [] })));
        assert_eq!(first.links(Category::Profile).len(), 1);
        assert!(second.links(Category::Profile).is_empty());
    }
}
