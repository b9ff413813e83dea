//! Filesystem- and URL-safe slugs.

use feedsite_entry::link_path;

/// Slug used whenever the source text has nothing usable left in it.
pub const UNTITLED_SLUG: &str = "untitled";

/// Converts arbitrary text into a slug.
///
/// The text is lowercased, whitespace runs become single hyphens, every
/// character outside `[a-z0-9-]` is dropped, hyphen runs left behind by
/// dropped punctuation are collapsed, and leading/trailing hyphens are
/// trimmed. The result is never empty: it falls back to `"untitled"`.
///
/// ```
/// use feedsite_site::slugify;
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("  Rust: 2024 Edition!  "), "rust-2024-edition");
/// assert_eq!(slugify("¿¡!?"), "untitled");
/// ```
pub fn slugify(text: impl AsRef<str>) -> String {
    let lowered = text.as_ref().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    for word in lowered.split_whitespace() {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.extend(word.chars().filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '-')));
    }
    let mut collapsed = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }
    match collapsed.trim_matches('-') {
        "" => UNTITLED_SLUG.to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Slug of the last non-empty path segment of a link, with any file
/// extension removed. `None` when the link has no usable segment.
///
/// ```
/// use feedsite_site::link_slug;
/// assert_eq!(link_slug("https://example.com/2024/03/Hello_World.html").as_deref(), Some("helloworld"));
/// assert_eq!(link_slug("https://example.com/"), None);
/// ```
pub fn link_slug(link: &str) -> Option<String> {
    let segment = link_path(link).split('/').rfind(|s| !s.trim().is_empty())?;
    let stem = match segment.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => segment,
    };
    let slug = slugify(stem);
    (slug != UNTITLED_SLUG).then_some(slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Hello World", "hello-world")]
    #[case("About", "about")]
    #[case("  leading and trailing  ", "leading-and-trailing")]
    #[case("tabs\tand\nnewlines", "tabs-and-newlines")]
    #[case("Multiple   Spaces", "multiple-spaces")]
    #[case("What's New in 2024?", "whats-new-in-2024")]
    #[case("C++ & Rust", "c-rust")]
    #[case("-already-hyphenated-", "already-hyphenated")]
    #[case("a - b", "a-b")]
    #[case("Café Olé", "caf-ol")]
    #[case("日本語", UNTITLED_SLUG)]
    #[case("", UNTITLED_SLUG)]
    #[case("   ", UNTITLED_SLUG)]
    #[case("---", UNTITLED_SLUG)]
    #[case("Untitled", "untitled")]
    fn test_slugify(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[test]
    fn test_slugs_are_safe() {
        let inputs = [
            "Hello, World!",
            "  -- spaced -- out --  ",
            "Ünïcödé Tïtlé",
            "../../etc/passwd",
            "<script>alert(1)</script>",
            "emoji 🦀 crab",
            "\u{00a0}non-breaking\u{2003}spaces",
            "",
        ];
        for input in inputs {
            let slug = slugify(input);
            assert!(!slug.is_empty(), "{input:?} produced an empty slug");
            assert!(
                slug.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-')),
                "{input:?} produced {slug:?}"
            );
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{input:?} produced {slug:?}");
        }
    }

    #[rstest]
    #[case("https://example.com/2024/03/my-first-post.html", Some("my-first-post"))]
    #[case("https://example.com/pages/about/", Some("about"))]
    #[case("https://example.com/p/contact.html?m=1", Some("contact"))]
    #[case("https://example.com/.hidden", Some("hidden"))]
    #[case("https://example.com/", None)]
    #[case("https://example.com/%F0%9F%A6%80", Some("f09fa680"))]
    #[case("", None)]
    fn test_link_slug(#[case] link: &str, #[case] expected: Option<&str>) {
        assert_eq!(link_slug(link).as_deref(), expected);
    }
}
