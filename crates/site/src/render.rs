//! HTML rendering with [upon] templates.
//!
//! Two built-in templates are embedded at compile time with
//! [`rust-embed`](rust_embed): `page.html` for individual entries and
//! `index.html` for the table of contents. Both are compiled once when the
//! [`Renderer`] is created, so a broken template fails fast.
//!
//! Values are inserted verbatim unless piped through one of the formatters
//! registered here:
//!
//! - **`escape`**: HTML text escaping (`&`, `<`, `>`).
//! - **`attr`**: escaping for double-quoted attribute values.
//!
//! An entry's content is trusted, already-unescaped HTML and is never escaped.
//! Its title is escaped inside `<title>` but written literally in the `<h1>`.

use crate::error::{ErrorKind, Result};
use crate::index::IndexRecord;
use exn::{OptionExt, ResultExt};
use feedsite_entry::Entry;
use rust_embed::Embed;
use time::format_description::well_known::Rfc3339;
use tracing::instrument;
use upon::{Engine, Template, Value};

#[derive(Embed)]
#[folder = "templates/"]
struct Builtins;
impl Builtins {
    fn load(name: &str) -> Result<String> {
        let file = Self::get(name).ok_or_raise(|| ErrorKind::Template(name.to_string()))?;
        String::from_utf8(file.data.into_owned()).or_raise(|| ErrorKind::Template(name.to_string()))
    }
}

/// The fully rendered bytes of one output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage(Vec<u8>);
impl RenderedPage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Rendered output is always built from UTF-8 templates and strings.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}
impl From<String> for RenderedPage {
    fn from(html: String) -> Self {
        Self(html.into_bytes())
    }
}

/// Compiled page and index templates.
pub struct Renderer {
    engine: Engine<'static>,
    page: Template<'static>,
    index: Template<'static>,
}
impl Renderer {
    pub fn new() -> Result<Self> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        let page = engine.compile(Builtins::load("page.html")?).or_raise(|| ErrorKind::Template("page.html".into()))?;
        let index =
            engine.compile(Builtins::load("index.html")?).or_raise(|| ErrorKind::Template("index.html".into()))?;
        Ok(Self { engine, page, index })
    }

    /// Renders a standalone HTML document for one entry.
    ///
    /// The output is a pure function of the entry's title, content and
    /// publication timestamp.
    #[instrument(level = "trace", skip_all, fields(title = %entry.title))]
    pub fn render_entry(&self, entry: &Entry) -> Result<RenderedPage> {
        let datetime = entry
            .published_at
            .map(|at| at.format(&Rfc3339))
            .transpose()
            .or_raise(|| ErrorKind::Render(entry.title.clone()))?;
        let context = upon::value! {
            title: entry.title.as_str(),
            content: entry.content.as_str(),
            dated: datetime.is_some(),
            date: entry.published_date().unwrap_or_default(),
            datetime: datetime.unwrap_or_default(),
        };
        let html = self
            .page
            .render(&self.engine, context)
            .to_string()
            .or_raise(|| ErrorKind::Render(entry.title.clone()))?;
        Ok(html.into())
    }

    /// Renders the table of contents from already-ordered sections.
    pub(crate) fn render_index(&self, title: &str, pages: &[&IndexRecord], posts: &[&IndexRecord]) -> Result<RenderedPage> {
        let context = upon::value! {
            title: title,
            has_pages: !pages.is_empty(),
            pages: Self::items(pages),
            has_posts: !posts.is_empty(),
            posts: Self::items(posts),
        };
        let html =
            self.index.render(&self.engine, context).to_string().or_raise(|| ErrorKind::Render(title.to_string()))?;
        Ok(html.into())
    }

    fn items(records: &[&IndexRecord]) -> Value {
        Value::List(
            records
                .iter()
                .map(|record| {
                    upon::value! {
                        title: record.title.as_str(),
                        href: record.href.as_str(),
                        dated: record.date.is_some(),
                        date: record.display_date().unwrap_or_default(),
                    }
                })
                .collect(),
        )
    }
}

/// Custom [`upon`] formatters for HTML-safe output.
mod addons {
    use html_escape::{encode_double_quoted_attribute, encode_text};
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    /// Escapes string values for use as HTML text content.
    fn escape_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => write!(f, "{}", encode_text(s))?,
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    /// Escapes string values for use inside a double-quoted attribute.
    fn attr_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => write!(f, "{}", encode_double_quoted_attribute(s))?,
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    /// Registers the `escape` and `attr` formatters on the given engine.
    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("escape", escape_formatter);
        engine.add_formatter("attr", attr_formatter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use time::macros::datetime;

    fn entry(title: &str, content: &str) -> Entry {
        Entry {
            title: title.to_string(),
            content: content.to_string(),
            published_at: Some(datetime!(2024-03-01 10:00 UTC)),
            source_link: "https://example.com/ignored".to_string(),
            tags: BTreeSet::new(),
        }
    }

    #[test]
    fn test_builtins_available() {
        assert!(Builtins::load("page.html").unwrap().contains("<!DOCTYPE html>"));
        assert!(Builtins::load("index.html").unwrap().contains("<!DOCTYPE html>"));
        assert!(Builtins::load("missing.html").is_err());
    }

    #[test]
    fn test_render_entry() {
        let renderer = Renderer::new().unwrap();
        let page = renderer.render_entry(&entry("Hello World", "<p>hi</p>")).unwrap();
        let html = page.as_str();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<meta charset=\"UTF-8\">"));
        assert!(html.contains("<title>Hello World</title>"));
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>hi</p>"));
        assert!(html.contains("<time datetime=\"2024-03-01T10:00:00Z\">2024-03-01</time>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_title_escaped_only_in_head() {
        let renderer = Renderer::new().unwrap();
        let page = renderer.render_entry(&entry("Fish & <Chips>", "")).unwrap();
        assert!(page.as_str().contains("<title>Fish &amp; &lt;Chips&gt;</title>"));
        assert!(page.as_str().contains("<h1>Fish & <Chips></h1>"));
    }

    #[test]
    fn test_content_inserted_verbatim() {
        let renderer = Renderer::new().unwrap();
        let content = "<div class=\"post\"><a href=\"/x?a=1&amp;b=2\">link</a> &copy; 2024</div>";
        let page = renderer.render_entry(&entry("Verbatim", content)).unwrap();
        assert!(page.as_str().contains(content));
    }

    #[test]
    fn test_undated_entry_has_no_time() {
        let renderer = Renderer::new().unwrap();
        let mut undated = entry("About", "<p>bio</p>");
        undated.published_at = None;
        let page = renderer.render_entry(&undated).unwrap();
        assert!(!page.as_str().contains("<time"));
        assert!(page.as_str().contains("<h1>About</h1>\n<p>bio</p>"));
    }

    #[test]
    fn test_render_is_deterministic_and_ignores_link_and_tags() {
        let renderer = Renderer::new().unwrap();
        let first = entry("Same", "<p>same</p>");
        let mut second = first.clone();
        second.source_link = "https://example.com/elsewhere".into();
        second.tags.insert("page".into());
        assert_eq!(renderer.render_entry(&first).unwrap(), renderer.render_entry(&second).unwrap());
        assert_eq!(renderer.render_entry(&first).unwrap(), Renderer::new().unwrap().render_entry(&first).unwrap());
    }
}
