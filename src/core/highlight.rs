//! Span index over an article's source text.
//!
//! Highlight phrases are matched case-insensitively and only on word
//! boundaries, so a highlighted "sun" does not light up inside "sunny".
//! Overlapping matches resolve leftmost first, then longest.

use std::{
    collections::BTreeMap,
    ops::Range,
};

use regex::RegexBuilder;

pub const HIGHLIGHT_COLORS: [(&str, &str); 3] =
    [("yellow", "#fef08a"), ("orange", "#fed7aa"), ("pink", "#fbcfe8")];

pub const DEFAULT_HIGHLIGHT: &str = "#fef08a";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub range: Range<usize>,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Highlighted { text: &'a str, color: &'a str },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightIndex {
    spans: Vec<HighlightSpan>,
}

impl HighlightIndex {
    pub fn build(text: &str, highlights: &BTreeMap<String, String>) -> Self {
        let mut candidates: Vec<HighlightSpan> = Vec::new();

        for (phrase, color) in highlights {
            if phrase.trim().is_empty() {
                continue;
            }

            let regex = match RegexBuilder::new(&regex::escape(phrase)).case_insensitive(true).build()
            {
                Ok(regex) => regex,
                Err(e) => {
                    log::warn!("Skipping highlight {:?}: {}", phrase, e);
                    continue;
                }
            };

            // A rejected match can overlap a bounded one, so resume just past its start.
            let mut from = 0;
            while let Some(m) = regex.find_at(text, from) {
                if is_word_bounded(text, m.start(), m.end()) {
                    candidates.push(HighlightSpan { range: m.range(), color: color.clone() });
                    from = m.end();
                } else {
                    from = next_char_boundary(text, m.start());
                }
                if from >= text.len() {
                    break;
                }
            }
        }

        candidates.sort_by(|a, b| {
            a.range.start.cmp(&b.range.start).then_with(|| b.range.end.cmp(&a.range.end))
        });

        let mut spans: Vec<HighlightSpan> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let overlaps = spans.last().is_some_and(|last| candidate.range.start < last.range.end);
            if !overlaps {
                spans.push(candidate);
            }
        }

        Self { spans }
    }

    pub fn spans(&self) -> &[HighlightSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Splits `text` into alternating plain and highlighted runs. `text` must be
    /// the string the index was built from.
    pub fn segments<'a>(&'a self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::with_capacity(self.spans.len() * 2 + 1);
        let mut cursor = 0;

        for span in &self.spans {
            if span.range.end > text.len() {
                break;
            }
            if span.range.start > cursor {
                segments.push(Segment::Plain(&text[cursor..span.range.start]));
            }
            segments.push(Segment::Highlighted {
                text: &text[span.range.clone()],
                color: span.color.as_str(),
            });
            cursor = span.range.end;
        }

        if cursor < text.len() {
            segments.push(Segment::Plain(&text[cursor..]));
        }

        segments
    }
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    text[index..].chars().next().map_or(text.len(), |c| index + c.len_utf8())
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlights(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(p, c)| (p.to_string(), c.to_string())).collect()
    }

    #[test]
    fn test_single_phrase_is_wrapped() {
        let text = "The sun rises";
        let index = HighlightIndex::build(text, &highlights(&[("sun", "#fef08a")]));

        assert_eq!(
            index.segments(text),
            vec![
                Segment::Plain("The "),
                Segment::Highlighted { text: "sun", color: "#fef08a" },
                Segment::Plain(" rises"),
            ]
        );
    }

    #[test]
    fn test_matching_ignores_case_and_keeps_original_text() {
        let text = "Sun, SUN and sun.";
        let index = HighlightIndex::build(text, &highlights(&[("sun", "#fed7aa")]));

        let highlighted: Vec<&str> = index
            .segments(text)
            .into_iter()
            .filter_map(|s| match s {
                Segment::Highlighted { text, .. } => Some(text),
                Segment::Plain(_) => None,
            })
            .collect();
        assert_eq!(highlighted, vec!["Sun", "SUN", "sun"]);
    }

    #[test]
    fn test_no_match_inside_longer_word() {
        let text = "A sunny day under the sun";
        let index = HighlightIndex::build(text, &highlights(&[("sun", "#fef08a")]));

        assert_eq!(index.spans().len(), 1);
        assert_eq!(&text[index.spans()[0].range.clone()], "sun");
        assert_eq!(index.spans()[0].range.start, 22);
    }

    #[test]
    fn test_overlapping_phrases_prefer_longest() {
        let text = "ice cream and ice";
        let index = HighlightIndex::build(
            text,
            &highlights(&[("ice", "#fef08a"), ("ice cream", "#fbcfe8")]),
        );

        let spans = index.spans();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].range, 0..9);
        assert_eq!(spans[0].color, "#fbcfe8");
        assert_eq!(spans[1].range, 14..17);
        assert_eq!(spans[1].color, "#fef08a");
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let text = "Use C++ (not c) today.";
        let index = HighlightIndex::build(text, &highlights(&[("(not c)", "#fef08a")]));
        assert_eq!(index.spans().len(), 1);
        assert_eq!(&text[index.spans()[0].range.clone()], "(not c)");
    }

    #[test]
    fn test_bounded_match_overlapping_rejected_match_is_found() {
        let text = "xna na na";
        let index = HighlightIndex::build(text, &highlights(&[("na na", "#fef08a")]));

        assert_eq!(index.spans().len(), 1);
        assert_eq!(index.spans()[0].range, 4..9);
    }

    #[test]
    fn test_rejected_match_before_multibyte_text() {
        let text = "soléil sol";
        let index = HighlightIndex::build(text, &highlights(&[("sol", "#fed7aa")]));

        assert_eq!(index.spans().len(), 1);
        assert_eq!(&text[index.spans()[0].range.clone()], "sol");
        assert_eq!(index.spans()[0].range.start, 8);
    }

    #[test]
    fn test_empty_index() {
        let text = "The sun rises";
        let empty = HighlightIndex::build(text, &BTreeMap::new());
        assert!(empty.is_empty());
        assert_eq!(empty.segments(text), vec![Segment::Plain(text)]);
    }
}
