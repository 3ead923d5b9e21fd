//! Markdown output formatting.

use std::borrow::Cow;

use serde_json::Value;

use crate::models::{Authorship, Work};

/// Maximum number of authors listed in paper details.
pub const AUTHOR_LIMIT: usize = 20;

/// Maximum abstract length, in characters.
pub const ABSTRACT_LIMIT: usize = 5000;

/// Number of authors named per entry in a search summary.
const SUMMARY_AUTHORS: usize = 3;

/// Returned instead of paper details when the record cannot be formatted.
pub const FORMAT_ERROR_MESSAGE: &str =
    "Error: Unable to format paper details. This may be due to unexpected data structure from the API.";

/// Display-ready fields of one work, with every default already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperView<'a> {
    pub title: &'a str,
    pub year: String,
    pub venue: &'a str,
    pub doi: &'a str,
    pub citations: i64,
    pub access: String,
    pub authors: String,
    pub author_note: Option<String>,
    pub abstract_text: String,
    pub abstract_truncated: bool,
    pub links: String,
}

impl<'a> PaperView<'a> {
    /// Extract display fields from a work.
    #[must_use]
    pub fn from_work(work: &'a Work) -> Self {
        let (abstract_text, abstract_truncated) = match work.abstract_text() {
            Some(text) => truncate_chars(&text, ABSTRACT_LIMIT),
            None => ("No abstract available".to_string(), false),
        };

        Self {
            title: work.title_text().unwrap_or("Untitled Paper"),
            year: work
                .publication_year
                .map_or_else(|| "Year unknown".to_string(), |y| y.to_string()),
            venue: work.venue().unwrap_or("Unknown Venue"),
            doi: work.doi.as_deref().unwrap_or("Not available"),
            citations: work.citations(),
            access: access_line(work),
            authors: author_list(&work.authorships),
            author_note: author_note(work.authorships.len()),
            abstract_text,
            abstract_truncated,
            links: links_section(work),
        }
    }

    /// Render the full markdown document.
    #[must_use]
    pub fn render(&self) -> String {
        let author_note = self.author_note.as_deref().unwrap_or("");
        let abstract_note = if self.abstract_truncated {
            "\n\n*Note: Abstract has been truncated due to length.*"
        } else {
            ""
        };

        format!(
            "# {title}\n\n\
             ## Publication Information\n\
             - **Year:** {year}\n\
             - **Venue:** {venue}\n\
             - **DOI:** {doi}\n\
             - **Citations:** {citations}\n\
             - **{access}**\n\n\
             ## Authors\n\
             {authors}{author_note}\n\n\
             ## Abstract\n\
             {abstract_text}{abstract_note}\n\n\
             ## Links\n\
             {links}\n",
            title = self.title,
            year = self.year,
            venue = self.venue,
            doi = self.doi,
            citations = self.citations,
            access = self.access,
            authors = self.authors,
            abstract_text = self.abstract_text,
            links = self.links,
        )
    }
}

/// Format one work as a markdown document.
///
/// Never fails: an empty record yields [`FORMAT_ERROR_MESSAGE`].
#[must_use]
pub fn format_paper_details(work: &Work) -> String {
    if work.is_empty() {
        tracing::error!("Error formatting paper details: invalid paper data");
        return FORMAT_ERROR_MESSAGE.to_string();
    }
    PaperView::from_work(work).render()
}

/// Format an untyped API payload as a markdown document.
#[must_use]
pub fn format_paper_value(value: Value) -> String {
    format_paper_details(&Work::from_value(value))
}

/// Format search results as a numbered markdown digest under `label`.
#[must_use]
pub fn format_search_summary(label: &str, works: &[Work]) -> String {
    if works.is_empty() {
        return format!("No results found for query: \"{label}\"");
    }

    let entries: Vec<String> = works
        .iter()
        .enumerate()
        .map(|(i, work)| summary_entry(i + 1, work))
        .collect();

    format!("# Search Results for: \"{label}\"\n\n{}", entries.join("\n\n"))
}

fn summary_entry(index: usize, work: &Work) -> String {
    let mut authors = work.leading_author_names(SUMMARY_AUTHORS).join(", ");
    if work.authorships.len() > SUMMARY_AUTHORS {
        authors.push_str(" et al.");
    }

    let year: Cow<'_, str> =
        work.publication_year.map_or(Cow::Borrowed("N/A"), |y| Cow::Owned(y.to_string()));

    format!(
        "{index}. **{title}** ({year})\n   Authors: {authors}\n   Citations: {citations}\n   Resource URI: paper://{id}",
        title = work.title_text().unwrap_or("Untitled"),
        citations = work.citations(),
        id = work.id.as_deref().unwrap_or(""),
    )
}

fn access_line(work: &Work) -> String {
    if !work.is_open_access() {
        return "Open Access: No".to_string();
    }
    match work.oa_url() {
        Some(url) => format!("Open Access: Yes (URL: {url})"),
        None => "Open Access: Yes".to_string(),
    }
}

fn author_list(authorships: &[Authorship]) -> String {
    if authorships.is_empty() {
        return "No author information available".to_string();
    }

    authorships
        .iter()
        .take(AUTHOR_LIMIT)
        .map(|authorship| {
            let Some(author) = &authorship.author else {
                return "Unknown Author".to_string();
            };
            let name = author.display_name.as_deref().unwrap_or("Unknown Author");
            match authorship.first_institution() {
                Some(institution) => format!("{name} ({institution})"),
                None => name.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn author_note(total: usize) -> Option<String> {
    (total > AUTHOR_LIMIT).then(|| {
        format!("\n\n*Note: This paper has {total} authors. Showing first {AUTHOR_LIMIT} only.*")
    })
}

/// Cut `text` to `limit` characters, appending `...` when shortened.
fn truncate_chars(text: &str, limit: usize) -> (String, bool) {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => (format!("{}...", &text[..cut]), true),
        None => (text.to_string(), false),
    }
}

fn links_section(work: &Work) -> String {
    let mut links = Vec::new();
    if let Some(url) = work.landing_page_url() {
        links.push(format!("- [Publication Page]({url})"));
    }
    if let Some(doi) = work.bare_doi() {
        links.push(format!("- [DOI Link](https://doi.org/{doi})"));
    }

    if links.is_empty() { "No links available".to_string() } else { links.join("\n") }
}
