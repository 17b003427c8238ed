//! Translation tables: the word dictionary and the ordered sentence-opener rules.
//!
//! Tables are plain data so they can be loaded from a file and swapped or extended
//! without touching the pipeline. The built-in table is English to Russian and tuned for
//! Skyrim quest and dialogue text.
//!
//! # Table file shape
//!
//! ```json
//! {
//!   "words": { "find": "найди", "key": "ключ" },
//!   "openers": [
//!     { "phrase": "i have found ", "replacement": "Я нашла " },
//!     { "phrase": "i have ", "replacement": "У меня " }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;

const BUILTIN_WORDS: &[(&str, &str)] = &[
    ("find", "найди"),
    ("search", "поищи"),
    ("listen", "послушай"),
    ("talk", "поговори"),
    ("bring", "принеси"),
    ("return", "верни"),
    ("give", "дай"),
    ("fetch", "забери"),
    ("take", "возьми"),
    ("book", "книгу"),
    ("key", "ключ"),
    ("keys", "ключи"),
    ("oil", "масло"),
    ("gyro", "гироскоп"),
    ("dynamo", "динамо"),
    ("dyno", "динамо"),
    ("arcanaeum", "арканеум"),
    ("alftand", "алфтанд"),
    ("mzinchaleft", "мзинчалефт"),
    ("winterhold", "винтерхолд"),
    ("markarth", "маркарт"),
    ("morthal", "морфал"),
    ("skyrim", "скайрим"),
    ("please", "пожалуйста"),
    ("now", "сейчас"),
    ("sorry", "простите"),
    ("thank", "спасибо"),
    ("yes", "да"),
    ("no", "нет"),
    ("good", "хорошо"),
    ("well", "ну"),
    ("what", "что"),
    ("why", "почему"),
    ("how", "как"),
    ("you", "вы"),
    ("me", "меня"),
    ("my", "мой"),
    ("your", "ваш"),
];

// Checked in this order; the first match wins.
const BUILTIN_OPENERS: &[(&str, &str)] = &[
    ("i found ", "Я нашла "),
    ("i have found ", "Я нашла "),
    ("i got ", "Я достала "),
    ("i have ", "У меня "),
    ("i am ", "Я "),
    ("i'm ", "Я "),
    ("i ", "Я "),
];

/// A whole-span prefix rewrite: when a span starts with `phrase` (compared lowercase),
/// the phrase is replaced by `replacement` and the rest of the span is kept as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenerRule {
    pub phrase: String,
    pub replacement: String,
}

impl OpenerRule {
    pub fn new(phrase: impl Into<String>, replacement: impl Into<String>) -> Self {
        OpenerRule {
            phrase: phrase.into(),
            replacement: replacement.into(),
        }
    }
}

/// Word dictionary plus ordered opener rules.
///
/// Dictionary keys and opener phrases are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LexiconTable")]
pub struct Lexicon {
    words: BTreeMap<String, String>,
    openers: Vec<OpenerRule>,
}

/// On-disk shape of a lexicon, validated into a [`Lexicon`].
#[derive(Debug, Clone, Default, Deserialize)]
struct LexiconTable {
    #[serde(default)]
    words: BTreeMap<String, String>,
    #[serde(default)]
    openers: Vec<OpenerRule>,
}

impl TryFrom<LexiconTable> for Lexicon {
    type Error = Error;

    fn try_from(table: LexiconTable) -> Result<Self, Self::Error> {
        let mut lexicon = Lexicon::empty();
        for (word, translation) in table.words {
            if word.trim().is_empty() {
                return Err(Error::lexicon_error("dictionary key is empty"));
            }
            if translation.is_empty() {
                return Err(Error::lexicon_error(format!(
                    "dictionary entry `{}` has an empty translation",
                    word
                )));
            }
            lexicon.insert_word(&word, translation);
        }
        for rule in table.openers {
            if rule.phrase.trim().is_empty() {
                return Err(Error::lexicon_error("opener phrase is empty"));
            }
            if rule.replacement.is_empty() {
                return Err(Error::lexicon_error(format!(
                    "opener `{}` has an empty replacement",
                    rule.phrase
                )));
            }
            lexicon.push_opener(rule);
        }
        Ok(lexicon)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Lexicon {
    /// The built-in English to Russian table.
    pub fn builtin() -> Self {
        let mut lexicon = Lexicon::empty();
        for (word, translation) in BUILTIN_WORDS {
            lexicon.insert_word(word, *translation);
        }
        for (phrase, replacement) in BUILTIN_OPENERS {
            lexicon.push_opener(OpenerRule::new(*phrase, *replacement));
        }
        lexicon
    }

    /// A table with no words and no opener rules; translates nothing.
    pub fn empty() -> Self {
        Lexicon {
            words: BTreeMap::new(),
            openers: Vec::new(),
        }
    }

    /// Parses and validates a JSON table.
    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        serde_json::from_str(s).map_err(Error::Parse)
    }

    /// Adds or replaces a dictionary entry. The key is lowercased.
    pub fn with_word(mut self, word: &str, translation: impl Into<String>) -> Self {
        self.insert_word(word, translation);
        self
    }

    /// Appends an opener rule after the existing ones. The phrase is lowercased.
    pub fn with_opener(mut self, rule: OpenerRule) -> Self {
        self.push_opener(rule);
        self
    }

    /// Looks up a lowercase word.
    pub fn lookup(&self, lowercase_word: &str) -> Option<&str> {
        self.words.get(lowercase_word).map(String::as_str)
    }

    pub fn words(&self) -> &BTreeMap<String, String> {
        &self.words
    }

    /// Opener rules in the order they are tried.
    pub fn openers(&self) -> &[OpenerRule] {
        &self.openers
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.openers.is_empty()
    }

    /// Overlays `other` on this table: its words replace same-key entries, and its
    /// opener rules are tried before the existing ones.
    pub fn merge(mut self, other: Lexicon) -> Self {
        self.words.extend(other.words);
        let existing = std::mem::take(&mut self.openers);
        self.openers = other.openers;
        for rule in existing {
            if !self.openers.iter().any(|r| r.phrase == rule.phrase) {
                self.openers.push(rule);
            }
        }
        self
    }

    fn insert_word(&mut self, word: &str, translation: impl Into<String>) {
        self.words.insert(word.to_lowercase(), translation.into());
    }

    fn push_opener(&mut self, rule: OpenerRule) {
        self.openers.push(OpenerRule {
            phrase: rule.phrase.to_lowercase(),
            replacement: rule.replacement,
        });
    }
}
