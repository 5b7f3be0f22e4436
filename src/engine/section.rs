#![forbid(unsafe_code)]

//! Locating prompt sections inside the prompt document
//!
//! Two layouts are recognized. A heading section starts at a level 2-6
//! heading line carrying the `{#token}` marker and runs up to the next level
//! 2-6 heading. An enumerated section starts at an `N)` or `N.` line carrying
//! the marker and runs up to the next enumerated line. Headings are tried
//! first across the whole document.

use crate::types::Anchor;
use regex::Regex;
use std::sync::LazyLock;

static HEADING_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{2,6}\s+").expect("heading regex is valid"));

static ENUMERATED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[).]\s+").expect("enumerated item regex is valid"));

static ENUMERATED_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[).]").expect("enumerated start regex is valid"));

static ANCHORED_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#{2,6}\s+(.+?)\s*(?:\{#([A-Za-z0-9._:-]+)\})?\s*$")
        .expect("anchored heading regex is valid")
});

static ANCHORED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+[).]\s+(.+?)\s*(?:\{#([A-Za-z0-9._:-]+)\})?\s*$")
        .expect("anchored item regex is valid")
});

/// Which layout a section was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Heading,
    Enumerated,
}

/// A located section of the prompt document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'d> {
    pub kind: SectionKind,
    /// Section text, starting with its marker line
    pub text: &'d str,
    /// 1-indexed line number of the marker line
    pub line: usize,
}

/// A line of the document with its byte offset
#[derive(Debug, Clone, Copy)]
struct Line<'d> {
    number: usize,
    start: usize,
    content: &'d str,
}

fn lines(document: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    document
        .split_inclusive('\n')
        .enumerate()
        .map(move |(idx, raw)| {
            let start = offset;
            offset += raw.len();
            let content = raw.trim_end_matches('\n').trim_end_matches('\r');
            Line {
                number: idx + 1,
                start,
                content,
            }
        })
}

fn carries_marker(line: &str, marker: &str) -> bool {
    line.to_lowercase().contains(marker)
}

/// Find the section for `anchor`, or `None` if neither layout has it
pub fn locate_section<'d>(document: &'d str, anchor: &Anchor) -> Option<Section<'d>> {
    if anchor.is_empty() {
        return None;
    }
    let marker = anchor.marker();

    find_section(document, &marker, SectionKind::Heading)
        .or_else(|| find_section(document, &marker, SectionKind::Enumerated))
}

fn find_section<'d>(document: &'d str, marker: &str, kind: SectionKind) -> Option<Section<'d>> {
    let (opens, closes): (&Regex, &Regex) = match kind {
        SectionKind::Heading => (&*HEADING_START, &*HEADING_START),
        SectionKind::Enumerated => (&*ENUMERATED_ITEM, &*ENUMERATED_START),
    };

    let mut all = lines(document);
    let first = all.find(|l| opens.is_match(l.content) && carries_marker(l.content, marker))?;

    let end = all
        .find(|l| closes.is_match(l.content))
        .map(|l| l.start)
        .unwrap_or(document.len());

    Some(Section {
        kind,
        text: &document[first.start..end],
        line: first.number,
    })
}

/// A prompt section declared in the document with an explicit anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchoredSection {
    pub title: String,
    pub anchor: Anchor,
    pub kind: SectionKind,
    pub line: usize,
}

/// Collect every heading or enumerated line that ends with an explicit
/// `{#token}` marker, in document order
pub fn scan_anchored_sections(document: &str) -> Vec<AnchoredSection> {
    let mut sections = Vec::new();

    for line in lines(document) {
        let (captures, kind) = if let Some(c) = ANCHORED_HEADING.captures(line.content) {
            (c, SectionKind::Heading)
        } else if let Some(c) = ANCHORED_ITEM.captures(line.content) {
            (c, SectionKind::Enumerated)
        } else {
            continue;
        };

        if let (Some(title), Some(token)) = (captures.get(1), captures.get(2)) {
            sections.push(AnchoredSection {
                title: title.as_str().trim().to_string(),
                anchor: Anchor::new(token.as_str()),
                kind,
                line: line.number,
            });
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# Prompt Catalog

Intro text.

## Foo {#foo}
run calc.exe now

### Nested heading
more text

## Bar {#bar}
bar body

1) Legacy item {#legacy}
legacy body
2) Second item {#second}
second body
";

    #[test]
    fn test_heading_section_stops_at_next_heading() {
        let section = locate_section(DOC, &Anchor::new("#foo")).unwrap();
        assert_eq!(section.kind, SectionKind::Heading);
        assert_eq!(section.line, 5);
        assert_eq!(section.text, "## Foo {#foo}\nrun calc.exe now\n\n");
    }

    #[test]
    fn test_heading_section_runs_to_end_of_document() {
        let doc = "## Foo {#foo}\nrun calc.exe now";
        let section = locate_section(doc, &Anchor::new("#foo")).unwrap();
        assert_eq!(section.text, doc);
    }

    #[test]
    fn test_last_heading_includes_trailing_enumerated_items() {
        let section = locate_section(DOC, &Anchor::new("bar")).unwrap();
        assert!(section.text.starts_with("## Bar {#bar}"));
        assert!(section.text.contains("second body"));
    }

    #[test]
    fn test_enumerated_section() {
        let section = locate_section(DOC, &Anchor::new("#legacy")).unwrap();
        assert_eq!(section.kind, SectionKind::Enumerated);
        assert_eq!(section.text, "1) Legacy item {#legacy}\nlegacy body\n");
    }

    #[test]
    fn test_enumerated_with_dot_prefix() {
        let doc = "1. First {#one}\nbody one\n2. Second {#two}\nbody two\n";
        let section = locate_section(doc, &Anchor::new("#one")).unwrap();
        assert_eq!(section.text, "1. First {#one}\nbody one\n");
        let section = locate_section(doc, &Anchor::new("#two")).unwrap();
        assert_eq!(section.text, "2. Second {#two}\nbody two\n");
    }

    #[test]
    fn test_marker_comparison_ignores_case() {
        let doc = "## Foo {#FooBar}\nbody";
        assert!(locate_section(doc, &Anchor::new("#foobar")).is_some());
        assert!(locate_section(doc, &Anchor::new("#FOOBAR")).is_some());
    }

    #[test]
    fn test_marker_must_match_exactly() {
        let doc = "## Foo {#foo-bar}\nbody";
        assert!(locate_section(doc, &Anchor::new("#foo")).is_none());
    }

    #[test]
    fn test_level_one_and_seven_headings_are_ignored() {
        let doc = "# Top {#top}\nbody\n####### Deep {#deep}\nbody";
        assert!(locate_section(doc, &Anchor::new("#top")).is_none());
        assert!(locate_section(doc, &Anchor::new("#deep")).is_none());
    }

    #[test]
    fn test_missing_anchor() {
        assert!(locate_section(DOC, &Anchor::new("#missing")).is_none());
        assert!(locate_section(DOC, &Anchor::new("#")).is_none());
    }

    #[test]
    fn test_heading_layout_preferred_over_enumerated() {
        let doc = "1) Item {#dup}\nitem body\n## Heading {#dup}\nheading body\n";
        let section = locate_section(doc, &Anchor::new("#dup")).unwrap();
        assert_eq!(section.kind, SectionKind::Heading);
        assert_eq!(section.text, "## Heading {#dup}\nheading body\n");
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = "## Foo {#foo}\r\nbody\r\n## Next\r\n";
        let section = locate_section(doc, &Anchor::new("#foo")).unwrap();
        assert_eq!(section.text, "## Foo {#foo}\r\nbody\r\n");
    }

    #[test]
    fn test_scan_anchored_sections() {
        let sections = scan_anchored_sections(DOC);
        let anchors: Vec<String> = sections.iter().map(|s| s.anchor.to_string()).collect();
        assert_eq!(anchors, vec!["#foo", "#bar", "#legacy", "#second"]);
        assert_eq!(sections[0].title, "Foo");
        assert_eq!(sections[0].kind, SectionKind::Heading);
        assert_eq!(sections[2].title, "Legacy item");
        assert_eq!(sections[2].kind, SectionKind::Enumerated);
        assert_eq!(sections[2].line, 14);
    }

    #[test]
    fn test_scan_ignores_unanchored_and_mid_line_markers() {
        let doc = "## Sources Ledger\n## Foo {#foo} trailing\n3) Plain item\n";
        assert!(scan_anchored_sections(doc).is_empty());
    }

    #[test]
    fn test_scan_lowercases_anchor() {
        let sections = scan_anchored_sections("## Title {#MiXeD}\n");
        assert_eq!(sections[0].anchor.to_string(), "#mixed");
    }
}
