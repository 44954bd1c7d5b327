//! Candidate evidence as handed over by collectors

use serde::{Deserialize, Serialize};

/// An unvalidated evidence item produced by a collector
///
/// Collectors (CSV signal extraction, site crawling, markdown knowledge
/// packs, profile parsing, case-study fetch, LinkedIn links) own a candidate
/// until it is handed to the engine. From then on it is never modified.
///
/// # Examples
///
/// ```
/// use dossier_domain::Candidate;
///
/// let candidate = Candidate::new("case_study")
///     .with_title("Acme cut onboarding time by 40%")
///     .with_url("https://acme.io/stories/onboarding");
///
/// assert_eq!(candidate.source_type, "case_study");
/// assert_eq!(candidate.title_text(), "Acme cut onboarding time by 40%");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Declared semantic bucket; must exist in the doctrine table
    pub category: String,

    /// Collector-level origin (e.g. "site_page", "supplier_profile")
    pub source_type: String,

    /// Headline or label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Narrative body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Verbatim quotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,

    /// Citation URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Free-form collector tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Identifier of the markdown section this came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_id: Option<String>,

    /// Claim id assigned by an upstream stage, kept for provenance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_claim_id: Option<String>,
}

/// Trimmed, non-empty view of an optional text field
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Candidate {
    /// Create a candidate whose source type matches its category
    pub fn new(category: impl Into<String>) -> Self {
        let category = category.into();
        Self {
            source_type: category.clone(),
            category,
            title: None,
            summary: None,
            quote: None,
            url: None,
            tag: None,
            markdown_id: None,
            upstream_claim_id: None,
        }
    }

    /// Override the source type
    pub fn with_source_type(mut self, source_type: impl Into<String>) -> Self {
        self.source_type = source_type.into();
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the quote
    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = Some(quote.into());
        self
    }

    /// Set the URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the markdown section id
    pub fn with_markdown_id(mut self, id: impl Into<String>) -> Self {
        self.markdown_id = Some(id.into());
        self
    }

    /// Set the upstream claim id
    pub fn with_upstream_claim_id(mut self, id: impl Into<String>) -> Self {
        self.upstream_claim_id = Some(id.into());
        self
    }

    /// Trimmed title, empty when absent
    pub fn title_text(&self) -> &str {
        present(&self.title).unwrap_or("")
    }

    /// Trimmed summary, empty when absent
    pub fn summary_text(&self) -> &str {
        present(&self.summary).unwrap_or("")
    }

    /// Trimmed quote, empty when absent
    pub fn quote_text(&self) -> &str {
        present(&self.quote).unwrap_or("")
    }

    /// Trimmed URL, empty when absent
    pub fn url_text(&self) -> &str {
        present(&self.url).unwrap_or("")
    }

    /// Markdown id if present and non-blank
    pub fn markdown_ref(&self) -> Option<&str> {
        present(&self.markdown_id)
    }

    /// Upstream claim id if present and non-blank
    pub fn upstream_ref(&self) -> Option<&str> {
        present(&self.upstream_claim_id)
    }

    /// Whether title, summary, quote and url are all blank
    pub fn is_blank(&self) -> bool {
        self.title_text().is_empty()
            && self.summary_text().is_empty()
            && self.quote_text().is_empty()
            && self.url_text().is_empty()
    }
}
