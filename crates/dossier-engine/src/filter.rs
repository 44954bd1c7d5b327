//! Placeholder filter - drops items with no usable content or junk URLs

use crate::config::PlaceholderRules;
use dossier_domain::StampedItem;
use serde::{Deserialize, Serialize};
use url::Url;

const TEMPLATE_MARKERS: [&str; 4] = ["{{", "}}", "%7B%7B", "%7D%7D"];

/// Why an item was filtered out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum RejectionReason {
    /// Title, summary, quote and URL are all blank
    Empty,

    /// Title is a scaffold word such as "Placeholder"
    ScaffoldTitle(String),

    /// URL still contains template markers
    TemplatedUrl(String),

    /// URL does not parse, is not `https://`, or has no host
    InsecureUrl(String),

    /// URL host is on the denylist
    DeniedHost(String),

    /// URL-less source type without a title or summary
    MissingNarrative,

    /// No URL, markdown id or upstream claim id to cite
    Unanchored,
}

impl RejectionReason {
    /// Stable label used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            RejectionReason::Empty => "empty",
            RejectionReason::ScaffoldTitle(_) => "scaffold_title",
            RejectionReason::TemplatedUrl(_) => "templated_url",
            RejectionReason::InsecureUrl(_) => "insecure_url",
            RejectionReason::DeniedHost(_) => "denied_host",
            RejectionReason::MissingNarrative => "missing_narrative",
            RejectionReason::Unanchored => "unanchored",
        }
    }
}

/// An item the filter dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Tier group of the dropped item
    pub tier_group: String,
    /// Its title, possibly empty
    pub title: String,
    /// Why it was dropped
    pub reason: RejectionReason,
}

/// Result of a filter pass
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Surviving items, in input order
    pub kept: Vec<StampedItem>,
    /// Dropped items, in input order
    pub rejected: Vec<Rejection>,
}

/// Removes placeholder, empty and junk-URL items
pub struct PlaceholderFilter<'a> {
    rules: &'a PlaceholderRules,
}

impl<'a> PlaceholderFilter<'a> {
    /// Create a filter over the given rules
    pub fn new(rules: &'a PlaceholderRules) -> Self {
        Self { rules }
    }

    /// Partition items into kept and rejected, preserving order
    pub fn filter(&self, items: Vec<StampedItem>) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();
        for item in items {
            match self.check(&item) {
                None => outcome.kept.push(item),
                Some(reason) => {
                    tracing::debug!(
                        tier_group = item.tier_group(),
                        reason = reason.kind(),
                        "placeholder rejected"
                    );
                    outcome.rejected.push(Rejection {
                        tier_group: item.tier_group().to_string(),
                        title: item.candidate().title_text().to_string(),
                        reason,
                    });
                }
            }
        }
        outcome
    }

    /// First rule the item breaks, if any
    pub fn check(&self, item: &StampedItem) -> Option<RejectionReason> {
        let candidate = item.candidate();

        if candidate.is_blank() {
            return Some(RejectionReason::Empty);
        }

        let title = candidate.title_text();
        if !title.is_empty()
            && self
                .rules
                .scaffold_titles
                .iter()
                .any(|s| s.trim().eq_ignore_ascii_case(title))
        {
            return Some(RejectionReason::ScaffoldTitle(title.to_string()));
        }

        let url = candidate.url_text();
        if !url.is_empty() {
            if let Some(reason) = self.check_url(url) {
                return Some(reason);
            }
        }

        let urlless = self
            .rules
            .urlless_source_types
            .iter()
            .any(|s| s == &candidate.source_type);
        if urlless {
            if title.is_empty() && candidate.summary_text().is_empty() {
                return Some(RejectionReason::MissingNarrative);
            }
            return None;
        }

        let anchored = !url.is_empty()
            || candidate.markdown_ref().is_some()
            || candidate.upstream_ref().is_some();
        if !anchored {
            return Some(RejectionReason::Unanchored);
        }

        None
    }

    fn check_url(&self, raw: &str) -> Option<RejectionReason> {
        if TEMPLATE_MARKERS.iter().any(|m| raw.contains(m)) {
            return Some(RejectionReason::TemplatedUrl(raw.to_string()));
        }

        let parsed = match Url::parse(raw) {
            Ok(parsed) if parsed.scheme() == "https" => parsed,
            _ => return Some(RejectionReason::InsecureUrl(raw.to_string())),
        };
        let host = match parsed.host_str() {
            Some(host) if !host.is_empty() => host.to_ascii_lowercase(),
            _ => return Some(RejectionReason::InsecureUrl(raw.to_string())),
        };

        if self.is_denied(&host) {
            return Some(RejectionReason::DeniedHost(host));
        }
        None
    }

    fn is_denied(&self, host: &str) -> bool {
        self.rules.denied_hosts.iter().any(|denied| {
            let denied = denied.trim().to_ascii_lowercase();
            host == denied
                || host
                    .strip_suffix(denied.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}
