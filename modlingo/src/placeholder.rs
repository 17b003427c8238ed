//! Placeholder-safe tokenization.
//!
//! Game strings carry markup and format tokens that the engine substitutes at runtime:
//! `<Alias=Player>`, `%s`, `%1$s`, `{0}`, `&amp;`, literal `\n`, `[pagebreak]`, book
//! markup such as `<p align="center">` and `<font face='$HandwrittenFont'>`. None of them
//! may be touched by translation.
//!
//! [`tokenize`] splits a string into [`Span`]s so that concatenating the spans gives back
//! the input exactly.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Leftmost-first: the generic tag arm wins over the specific tag arms after it.
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(concat!(
        r"<[^>]+>|%s|%\d+\$s|\{\d+\}|&#?\w+;|\\n|\\r|\\t|\[pagebreak\]|",
        r"<p[^>]*>|</p>|<b>|</b>|<i>|</i>|<font[^>]*>|</font>",
    ))
    .unwrap();
}

/// One piece of a tokenized string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    /// Markup or a format token; copied through unchanged.
    Placeholder(&'a str),
    /// Free text eligible for translation.
    Text(&'a str),
}

impl<'a> Span<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Span::Placeholder(s) | Span::Text(s) => s,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Span::Placeholder(_))
    }
}

/// Splits `input` into placeholder and free-text spans in original order.
/// Empty spans are never produced.
pub fn tokenize(input: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut last = 0;
    for m in PLACEHOLDER_REGEX.find_iter(input) {
        if m.start() > last {
            spans.push(Span::Text(&input[last..m.start()]));
        }
        spans.push(Span::Placeholder(m.as_str()));
        last = m.end();
    }
    if last < input.len() {
        spans.push(Span::Text(&input[last..]));
    }
    spans
}

/// Placeholders of `input` in occurrence order.
pub fn placeholders(input: &str) -> Vec<&str> {
    PLACEHOLDER_REGEX
        .find_iter(input)
        .map(|m| m.as_str())
        .collect()
}

/// Whether every placeholder of `source` occurs in `translated`, verbatim and in the
/// same relative order.
pub fn placeholders_preserved(source: &str, translated: &str) -> bool {
    let mut rest = translated;
    for token in placeholders(source) {
        match rest.find(token) {
            Some(pos) => rest = &rest[pos + token.len()..],
            None => return false,
        }
    }
    true
}
