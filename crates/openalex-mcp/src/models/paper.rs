//! Work (paper) data model matching the OpenAlex API schema.
//!
//! Every field is optional and parsed leniently; see [`super::lenient`].

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

/// A research paper ("work") from OpenAlex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    /// OpenAlex ID, usually a full URL such as `https://openalex.org/W2741809807`.
    #[serde(default, deserialize_with = "lenient::option")]
    pub id: Option<String>,

    /// Paper title.
    #[serde(default, deserialize_with = "lenient::option")]
    pub title: Option<String>,

    /// Display name (same as the title for works).
    #[serde(default, deserialize_with = "lenient::option")]
    pub display_name: Option<String>,

    /// Publication year.
    #[serde(default, deserialize_with = "lenient::option")]
    pub publication_year: Option<i64>,

    /// Number of citations this work has received.
    #[serde(default, deserialize_with = "lenient::option")]
    pub cited_by_count: Option<i64>,

    /// Authors in byline order.
    #[serde(default, deserialize_with = "lenient::seq")]
    pub authorships: Vec<Authorship>,

    /// Open access status.
    #[serde(default, deserialize_with = "lenient::option")]
    pub open_access: Option<OpenAccess>,

    /// Primary hosting location (venue and landing page).
    #[serde(default, deserialize_with = "lenient::option")]
    pub primary_location: Option<Location>,

    /// Plain-text abstract, when the payload carries one.
    #[serde(rename = "abstract", default, deserialize_with = "lenient::option")]
    pub r#abstract: Option<String>,

    /// OpenAlex abstract encoding: word -> positions.
    #[serde(default, deserialize_with = "lenient::option")]
    pub abstract_inverted_index: Option<BTreeMap<String, Vec<u32>>>,

    /// DOI, usually as a `https://doi.org/...` URL.
    #[serde(default, deserialize_with = "lenient::option")]
    pub doi: Option<String>,
}

impl Work {
    /// Build a work from an untyped value. Non-objects yield an empty work.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if value.is_object() { serde_json::from_value(value).unwrap_or_default() } else { Self::default() }
    }

    /// True when the record carries no recognised field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Title, falling back to `display_name`.
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref().or(self.display_name.as_deref())
    }

    /// Get citation count or 0 if not available.
    #[must_use]
    pub fn citations(&self) -> i64 {
        self.cited_by_count.unwrap_or(0)
    }

    /// Venue display name from the primary location.
    #[must_use]
    pub fn venue(&self) -> Option<&str> {
        self.primary_location.as_ref()?.source.as_ref()?.display_name.as_deref()
    }

    /// Landing page URL from the primary location.
    #[must_use]
    pub fn landing_page_url(&self) -> Option<&str> {
        self.primary_location.as_ref()?.landing_page_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Whether a free-to-read version exists.
    #[must_use]
    pub fn is_open_access(&self) -> bool {
        self.open_access.as_ref().and_then(|oa| oa.is_oa).unwrap_or(false)
    }

    /// Open access URL, if any.
    #[must_use]
    pub fn oa_url(&self) -> Option<&str> {
        self.open_access.as_ref()?.oa_url.as_deref().filter(|url| !url.is_empty())
    }

    /// The DOI without a resolver prefix (`10.1234/abc`).
    #[must_use]
    pub fn bare_doi(&self) -> Option<&str> {
        let doi = self.doi.as_deref()?.trim();
        let bare = ["https://doi.org/", "http://doi.org/", "https://dx.doi.org/", "doi:"]
            .iter()
            .find_map(|prefix| doi.strip_prefix(prefix))
            .unwrap_or(doi);
        (!bare.is_empty()).then_some(bare)
    }

    /// Abstract text, rebuilding it from the inverted index when needed.
    #[must_use]
    pub fn abstract_text(&self) -> Option<Cow<'_, str>> {
        if let Some(text) = self.r#abstract.as_deref() {
            return Some(Cow::Borrowed(text));
        }
        self.abstract_inverted_index
            .as_ref()
            .map(inverted_index_to_text)
            .filter(|text| !text.is_empty())
            .map(Cow::Owned)
    }

    /// Names of the first `n` authors that have a display name.
    #[must_use]
    pub fn leading_author_names(&self, n: usize) -> Vec<&str> {
        self.authorships
            .iter()
            .take(n)
            .filter_map(|a| a.author.as_ref()?.display_name.as_deref())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Reconstruct abstract text by ordering words by their positions.
fn inverted_index_to_text(index: &BTreeMap<String, Vec<u32>>) -> String {
    let mut positions: BTreeMap<u32, &str> = BTreeMap::new();
    for (word, places) in index {
        for place in places {
            positions.entry(*place).or_insert(word.as_str());
        }
    }
    positions.into_values().collect::<Vec<_>>().join(" ")
}

/// A join record linking an author to institutions for one work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorship {
    /// The author, absent for unresolved bylines.
    #[serde(default, deserialize_with = "lenient::option")]
    pub author: Option<AuthorRef>,

    /// Affiliations listed for this authorship.
    #[serde(default, deserialize_with = "lenient::seq")]
    pub institutions: Vec<Institution>,
}

impl Authorship {
    /// Display name of the first institution, if any.
    #[must_use]
    pub fn first_institution(&self) -> Option<&str> {
        self.institutions.first()?.display_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Minimal author reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    /// OpenAlex author ID.
    #[serde(default, deserialize_with = "lenient::option")]
    pub id: Option<String>,

    /// Author name.
    #[serde(default, deserialize_with = "lenient::option")]
    pub display_name: Option<String>,
}

/// Institution reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    /// Institution name.
    #[serde(default, deserialize_with = "lenient::option")]
    pub display_name: Option<String>,
}

/// Open access information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAccess {
    /// Whether the work is open access.
    #[serde(default, deserialize_with = "lenient::option")]
    pub is_oa: Option<bool>,

    /// Best open access URL.
    #[serde(default, deserialize_with = "lenient::option")]
    pub oa_url: Option<String>,
}

/// Hosting location of a work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Journal, repository or conference.
    #[serde(default, deserialize_with = "lenient::option")]
    pub source: Option<Source>,

    /// Publisher landing page.
    #[serde(default, deserialize_with = "lenient::option")]
    pub landing_page_url: Option<String>,
}

/// Publication venue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Venue name.
    #[serde(default, deserialize_with = "lenient::option")]
    pub display_name: Option<String>,
}

/// One page of `/works` search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorksPage {
    /// Result metadata.
    #[serde(default, deserialize_with = "lenient::option")]
    pub meta: Option<PageMeta>,

    /// Matching works.
    #[serde(default, deserialize_with = "lenient::seq")]
    pub results: Vec<Work>,
}

/// Search result metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
    /// Total number of matching works.
    #[serde(default, deserialize_with = "lenient::option")]
    pub count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_work_from_full_record() {
        let work = Work::from_value(json!({
            "id": "https://openalex.org/W1",
            "title": "Attention",
            "publication_year": 2017,
            "cited_by_count": 90000,
            "authorships": [{
                "author": {"id": "https://openalex.org/A1", "display_name": "Ashish Vaswani"},
                "institutions": [{"display_name": "Google"}]
            }],
            "open_access": {"is_oa": true, "oa_url": "https://arxiv.org/pdf/1706.03762"},
            "primary_location": {
                "source": {"display_name": "NeurIPS"},
                "landing_page_url": "https://papers.nips.cc/x"
            },
            "doi": "https://doi.org/10.5555/3295222"
        }));

        assert_eq!(work.title_text(), Some("Attention"));
        assert_eq!(work.citations(), 90000);
        assert_eq!(work.venue(), Some("NeurIPS"));
        assert!(work.is_open_access());
        assert_eq!(work.bare_doi(), Some("10.5555/3295222"));
        assert_eq!(work.authorships[0].first_institution(), Some("Google"));
    }

    #[test]
    fn test_work_tolerates_wrong_types() {
        let work = Work::from_value(json!({
            "title": 12,
            "publication_year": "soon",
            "authorships": "nobody",
            "primary_location": null,
            "open_access": "yes"
        }));

        assert!(work.title.is_none());
        assert!(work.publication_year.is_none());
        assert!(work.authorships.is_empty());
        assert!(!work.is_open_access());
        assert!(work.is_empty());
    }

    #[test]
    fn test_non_object_is_empty() {
        assert!(Work::from_value(Value::Null).is_empty());
        assert!(Work::from_value(json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn test_abstract_from_inverted_index() {
        let work = Work::from_value(json!({
            "abstract_inverted_index": {"world": [1], "Hello": [0], "again": [3], "hello": [2]}
        }));
        assert_eq!(work.abstract_text().as_deref(), Some("Hello world hello again"));
    }

    #[test]
    fn test_plain_abstract_wins() {
        let work = Work::from_value(json!({
            "abstract": "Plain",
            "abstract_inverted_index": {"Other": [0]}
        }));
        assert_eq!(work.abstract_text().as_deref(), Some("Plain"));
    }

    #[test]
    fn test_leading_author_names_skips_missing() {
        let work = Work::from_value(json!({
            "authorships": [
                {"author": {"display_name": "A"}},
                {"author": null},
                {"author": {"display_name": "C"}},
                {"author": {"display_name": "D"}}
            ]
        }));
        assert_eq!(work.leading_author_names(3), vec!["A", "C"]);
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let work = Work::from_value(json!({
            "authorships": [
                {"author": {"display_name": ""}, "institutions": [{"display_name": ""}]},
                {"author": {"display_name": "B"}}
            ],
            "primary_location": {"landing_page_url": ""}
        }));
        assert_eq!(work.leading_author_names(3), vec!["B"]);
        assert_eq!(work.authorships[0].first_institution(), None);
        assert_eq!(work.landing_page_url(), None);
    }
}
