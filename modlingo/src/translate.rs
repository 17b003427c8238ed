//! Dictionary- and rule-based translation of a single string.
//!
//! A string is tokenized into placeholder and free-text spans. Placeholders are copied
//! through. Each free-text span is first tried against the opener rules as a whole; if no
//! rule matches, its words are looked up in the dictionary one by one.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    lexicon::Lexicon,
    placeholder::{self, Span},
};

lazy_static! {
    static ref NON_WORD_REGEX: Regex = Regex::new(r"\W+").unwrap();
}

/// Whether `text` contains a letter of the target (Cyrillic) alphabet.
///
/// This is the translated/untranslated signal: a destination holding any such letter is
/// considered already translated.
pub fn has_target_script(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, 'А'..='я' | 'Ё' | 'ё'))
}

/// Stateless translator over a borrowed [`Lexicon`].
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> Translator<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Translator { lexicon }
    }

    /// Translates `text`, leaving every placeholder untouched and in place.
    pub fn translate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for span in placeholder::tokenize(text) {
            match span {
                Span::Placeholder(token) => out.push_str(token),
                Span::Text(free) => match self.try_rewrite(free) {
                    Some(rewritten) => out.push_str(&rewritten),
                    None => out.push_str(&self.substitute(free)),
                },
            }
        }
        out
    }

    /// Word-by-word dictionary substitution. Whitespace and punctuation are kept verbatim;
    /// words missing from the dictionary pass through unchanged.
    pub fn substitute(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for separator in NON_WORD_REGEX.find_iter(text) {
            self.push_word(&mut out, &text[last..separator.start()]);
            out.push_str(separator.as_str());
            last = separator.end();
        }
        self.push_word(&mut out, &text[last..]);
        out
    }

    /// Rewrites a leading sentence opener ("I have found ", "I'm ", ...).
    ///
    /// The span is trimmed; rules are tried in table order and the first whose phrase
    /// prefixes the span (case-insensitively) wins. The remainder after the phrase keeps
    /// its original casing and is not translated further.
    pub fn try_rewrite(&self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        self.lexicon.openers().iter().find_map(|rule| {
            strip_prefix_ignore_case(trimmed, &rule.phrase)
                .map(|rest| format!("{}{}", rule.replacement, rest))
        })
    }

    fn push_word(&self, out: &mut String, word: &str) {
        if word.is_empty() {
            return;
        }
        match self.lexicon.lookup(&word.to_lowercase()) {
            Some(target) if is_title_case(word) => out.push_str(&capitalize(target)),
            Some(target) => out.push_str(target),
            None => out.push_str(word),
        }
    }
}

/// Strips `lowercase_prefix` from `s`, comparing each character of `s` lowercased.
fn strip_prefix_ignore_case<'s>(s: &'s str, lowercase_prefix: &str) -> Option<&'s str> {
    let mut chars = s.char_indices();
    for expected in lowercase_prefix.chars() {
        let (_, c) = chars.next()?;
        let mut lower = c.to_lowercase();
        if lower.next() != Some(expected) || lower.next().is_some() {
            return None;
        }
    }
    match chars.next() {
        Some((idx, _)) => Some(&s[idx..]),
        None => Some(""),
    }
}

/// Title case: at least one cased letter, uppercase letters only after uncased
/// characters, lowercase letters only after cased ones ("Key", "Dwarven", "O'Neil").
fn is_title_case(word: &str) -> bool {
    let mut cased = false;
    let mut previous_cased = false;
    for c in word.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else {
            previous_cased = false;
        }
    }
    cased
}

/// First character uppercased, the rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
