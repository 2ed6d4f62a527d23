/*!
 * Name and path predicates: illegal characters, whitespace and length
 */

use std::fmt;
use std::path::MAIN_SEPARATOR;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::WhitespaceScope;
use crate::error::Result;

/// Characters checked when no explicit list is given
pub const DEFAULT_ILLEGAL_CHARS: [char; 20] = [
    '@', ':', '*', '?', '!', '<', '>', '|', '&', '#', '%', '$', '~', '+', '=', '\'', '"', '{',
    '}', '^',
];

/// Longest path accepted by legacy Windows APIs
pub const MAX_PATH_LENGTH: usize = 255;

static WHITESPACE_IN_PATH: Lazy<Regex> = Lazy::new(|| {
    let sep = regex::escape(&MAIN_SEPARATOR.to_string());
    Regex::new(&format!(r"^\s+|\s+$|\s+{sep}|{sep}\s+|\s{{2,}}")).unwrap()
});

static WHITESPACE_IN_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+|\s+$|\s{2,}").unwrap());

/// Ordered, deduplicated set of illegal characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllegalCharSet {
    chars: Vec<char>,
}

impl IllegalCharSet {
    /// Build a set from the given characters, dropping repeats.
    /// An empty input falls back to [`DEFAULT_ILLEGAL_CHARS`].
    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let mut set = Vec::new();
        for c in chars {
            if !set.contains(&c) {
                set.push(c);
            }
        }

        if set.is_empty() {
            return Self::default();
        }

        Self { chars: set }
    }

    /// Characters in first-seen order
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Characters that are not part of the default denylist
    pub fn unknown_chars(&self) -> Vec<char> {
        self.chars
            .iter()
            .copied()
            .filter(|c| !DEFAULT_ILLEGAL_CHARS.contains(c))
            .collect()
    }
}

impl Default for IllegalCharSet {
    fn default() -> Self {
        Self {
            chars: DEFAULT_ILLEGAL_CHARS.to_vec(),
        }
    }
}

impl fmt::Display for IllegalCharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.chars.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", joined.join(" "))
    }
}

/// Literal alternation over a character set, built once per run
#[derive(Debug, Clone)]
pub struct IllegalCharMatcher {
    pattern: Regex,
}

impl IllegalCharMatcher {
    /// Compile the alternation, escaping each character on its own
    pub fn new(set: &IllegalCharSet) -> Result<Self> {
        let alternation: Vec<String> = set
            .chars()
            .iter()
            .map(|c| regex::escape(&c.to_string()))
            .collect();
        let pattern = Regex::new(&format!("({})", alternation.join("|")))?;
        Ok(Self { pattern })
    }

    /// Every illegal character in `name`, in order, duplicates kept
    pub fn find_all(&self, name: &str) -> Vec<char> {
        self.pattern
            .find_iter(name)
            .filter_map(|m| m.as_str().chars().next())
            .collect()
    }

    /// The compiled pattern source
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Count whitespace problems in `text`
pub fn whitespace_count(text: &str, scope: WhitespaceScope) -> usize {
    match scope {
        WhitespaceScope::Path => WHITESPACE_IN_PATH.find_iter(text).count(),
        WhitespaceScope::Name => WHITESPACE_IN_NAME.find_iter(text).count(),
    }
}

/// Character length of a path when it exceeds [`MAX_PATH_LENGTH`]
pub fn over_length(path: &str) -> Option<usize> {
    let length = path.chars().count();
    (length > MAX_PATH_LENGTH).then_some(length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_preserves_order() {
        let set = IllegalCharSet::from_chars("::@:#@".chars());
        assert_eq!(set.chars(), &[':', '@', '#']);
    }

    #[test]
    fn test_empty_set_uses_default() {
        let set = IllegalCharSet::from_chars("".chars());
        assert_eq!(set, IllegalCharSet::default());
        assert_eq!(set.chars().len(), DEFAULT_ILLEGAL_CHARS.len());
    }

    #[test]
    fn test_unknown_chars() {
        let set = IllegalCharSet::from_chars("@a;".chars());
        assert_eq!(set.unknown_chars(), vec!['a', ';']);
    }

    #[test]
    fn test_every_default_char_matches_itself_only() {
        let matcher = IllegalCharMatcher::new(&IllegalCharSet::default()).unwrap();
        for c in DEFAULT_ILLEGAL_CHARS {
            let name = format!("report{c}final.txt");
            assert_eq!(matcher.find_all(&name), vec![c], "char {c:?}");
        }
        assert!(matcher.find_all("plain-name_01.txt").is_empty());
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let set = IllegalCharSet::from_chars("*?|^$".chars());
        let matcher = IllegalCharMatcher::new(&set).unwrap();
        assert!(matcher.find_all("abc").is_empty());
        assert_eq!(matcher.find_all("a*b?c|d^e$"), vec!['*', '?', '|', '^', '$']);
    }

    #[test]
    fn test_find_all_keeps_duplicates() {
        let matcher = IllegalCharMatcher::new(&IllegalCharSet::default()).unwrap();
        assert_eq!(matcher.find_all("a@b@c#"), vec!['@', '@', '#']);
    }

    #[test]
    fn test_duplicate_input_same_matches() {
        let once = IllegalCharMatcher::new(&IllegalCharSet::from_chars(":".chars())).unwrap();
        let twice = IllegalCharMatcher::new(&IllegalCharSet::from_chars("::".chars())).unwrap();
        assert_eq!(once.as_str(), twice.as_str());
        assert_eq!(once.find_all("a:b:c"), twice.find_all("a:b:c"));
    }

    #[cfg(unix)]
    #[test]
    fn test_whitespace_in_path() {
        assert_eq!(whitespace_count("/data/clean/name.txt", WhitespaceScope::Path), 0);
        assert_eq!(whitespace_count("/data/ leading.txt", WhitespaceScope::Path), 1);
        assert_eq!(whitespace_count("/data/trailing /x", WhitespaceScope::Path), 1);
        assert_eq!(whitespace_count("/data/name.txt ", WhitespaceScope::Path), 1);
        assert_eq!(whitespace_count(" rel/name", WhitespaceScope::Path), 1);
        assert_eq!(whitespace_count("/data/two  spaces", WhitespaceScope::Path), 1);
        assert_eq!(whitespace_count("/data/single space", WhitespaceScope::Path), 0);
    }

    #[test]
    fn test_whitespace_in_name() {
        assert_eq!(whitespace_count(" leading.txt", WhitespaceScope::Name), 1);
        assert_eq!(whitespace_count(" both ", WhitespaceScope::Name), 2);
        assert_eq!(whitespace_count("a  b", WhitespaceScope::Name), 1);
        assert_eq!(whitespace_count("a b", WhitespaceScope::Name), 0);
    }

    #[test]
    fn test_length_boundary() {
        assert_eq!(over_length(&"a".repeat(255)), None);
        assert_eq!(over_length(&"a".repeat(256)), Some(256));
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        assert_eq!(over_length(&"é".repeat(200)), None);
    }
}
