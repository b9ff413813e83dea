use crate::models::{Entry, RawEntry};
use html_escape::decode_html_entities;
use std::collections::BTreeSet;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::{OffsetDateTime, UtcOffset};
use tracing::instrument;

/// Title given to entries whose feed item has no (or a blank) title.
pub const UNTITLED: &str = "Untitled";

/// Turns one raw feed item into an [`Entry`].
///
/// Never fails; every missing or malformed field degrades to a default:
///
/// | Field          | Preference                                  | Default      |
/// |----------------|---------------------------------------------|--------------|
/// | `title`        | `title`                                     | `"Untitled"` |
/// | `content`      | first `content` block, then `summary`       | `""`         |
/// | `published_at` | `published`, then `updated`                 | `None`       |
/// | `source_link`  | `link`                                      | `""`         |
///
/// HTML entities escaped by the feed format are decoded in both the title and
/// the content, so the stored content is literal HTML ready for embedding.
#[instrument(level = "trace", skip_all, fields(title = raw.title.as_deref()))]
pub fn normalize(raw: &RawEntry) -> Entry {
    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| decode_html_entities(t).into_owned())
        .unwrap_or_else(|| UNTITLED.to_string());
    let tags: BTreeSet<String> = raw.tags.iter().filter_map(|tag| tag.term()).map(str::to_string).collect();
    Entry {
        title,
        content: content(raw),
        published_at: published_at(raw),
        source_link: raw.link.as_deref().map(str::trim).unwrap_or_default().to_string(),
        tags,
    }
}

/// Picks the entry body in order of preference and decodes its entities.
fn content(raw: &RawEntry) -> String {
    let preferred = raw.content.first().and_then(|block| block.value.as_deref());
    match preferred.or(raw.summary.as_deref()) {
        Some(html) => decode_html_entities(html).into_owned(),
        None => String::new(),
    }
}

/// First parsable timestamp out of `published` then `updated`.
fn published_at(raw: &RawEntry) -> Option<OffsetDateTime> {
    [raw.published.as_deref(), raw.updated.as_deref()].into_iter().flatten().find_map(|value| {
        let parsed = parse_timestamp(value);
        if parsed.is_none() {
            tracing::debug!(value, "Ignoring unparsable entry timestamp");
        }
        parsed
    })
}

/// Parses a feed timestamp and normalizes it to UTC.
///
/// Atom timestamps (`2024-03-01T10:00:00.000000Z`) are RFC 3339; RSS-derived
/// feeds sometimes carry RFC 2822 dates instead, so both are accepted.
pub fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    let value = value.trim();
    OffsetDateTime::parse(value, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(value, &Rfc2822))
        .ok()
        .map(|at| at.to_offset(UtcOffset::UTC))
}
