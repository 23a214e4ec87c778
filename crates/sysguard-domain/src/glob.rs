//! Shell-style wildcard matching shared by host patterns and tag filters.
//!
//! Semantics follow `fnmatch`: `*` and `?` also match `/`, `[...]` / `[!...]` are character
//! classes, a `[` with no closing `]` is an ordinary character, backslash is an ordinary
//! character, braces are literal, and the pattern is anchored against the whole text.
//! Matching is case-sensitive. `[^...]` is a negated class as well.

use globset::{GlobBuilder, GlobMatcher};

#[derive(Clone, Debug)]
pub struct Pattern {
    raw: String,
    matcher: Option<GlobMatcher>,
}

impl Pattern {
    /// Compile `raw`, failing on patterns globset cannot express (e.g. a reversed range
    /// such as `[9-0]`).
    pub fn try_new(raw: &str) -> Result<Self, globset::Error> {
        let glob = GlobBuilder::new(&to_globset(raw))
            .literal_separator(false)
            .backslash_escape(false)
            .build()?;
        Ok(Self {
            raw: raw.to_string(),
            matcher: Some(glob.compile_matcher()),
        })
    }

    /// Compile `raw`; a pattern [`Pattern::try_new`] rejects is compared literally instead.
    pub fn new(raw: &str) -> Self {
        Self::try_new(raw).unwrap_or_else(|_| Self {
            raw: raw.to_string(),
            matcher: None,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_match(&self, text: &str) -> bool {
        match &self.matcher {
            Some(m) => m.is_match(text),
            None => self.raw == text,
        }
    }
}

/// One-shot convenience over [`Pattern`].
pub fn glob_match(text: &str, pattern: &str) -> bool {
    Pattern::new(pattern).is_match(text)
}

// globset reads `{a,b}` as alternation and rejects an unclosed `[`; both become
// single-char classes so they match literally.
fn to_globset(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.extend(&chars[i..=end]);
                    i = end + 1;
                    continue;
                }
                None => out.push_str("[[]"),
            },
            '{' => out.push_str("[{]"),
            '}' => out.push_str("[}]"),
            c => out.push(c),
        }
        i += 1;
    }
    out
}

/// Index of the `]` closing the class opened at `start`. A `]` right after the opening
/// `[` (or its negation) is a member, not the end.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if matches!(chars.get(j), Some('!' | '^')) {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars[j.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| j + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_and_question_mark() {
        assert!(glob_match("CentOS Linux-7", "CentOS*-7"));
        assert!(glob_match("CentOS-7", "CentOS-?"));
        assert!(!glob_match("CentOS-77", "CentOS-?"));
        assert!(glob_match("anything/at all", "*"));
    }

    #[test]
    fn anchored_not_substring() {
        assert!(!glob_match("Red Hat Enterprise Linux Server-7", "Linux"));
        assert!(!glob_match("CentOS-7", "CentOS"));
        assert!(glob_match("CentOS-7", "CentOS-7"));
    }

    #[test]
    fn character_classes() {
        assert!(glob_match("CentOS-6", "CentOS-[67]"));
        assert!(!glob_match("CentOS-5", "CentOS-[67]"));
        assert!(glob_match("CentOS-5", "CentOS-[!67]"));
        assert!(glob_match("Debian-9", "Debian-[0-9]"));
    }

    #[test]
    fn case_sensitive() {
        assert!(!glob_match("centos-7", "CentOS-7"));
    }

    #[test]
    fn braces_are_literal() {
        assert!(glob_match("{a,b}", "{a,b}"));
        assert!(!glob_match("a", "{a,b}"));
        assert!(glob_match("x{", "x[{]"));
    }

    #[test]
    fn unclosed_bracket_is_literal_and_wildcards_still_apply() {
        assert!(glob_match("CentOS-[7", "CentOS-[7"));
        assert!(!glob_match("CentOS-7", "CentOS-[7"));
        assert!(glob_match("CxS-[x", "C*-[*"));
        assert!(glob_match("a[b", "?[?"));
    }

    #[test]
    fn closing_bracket_first_in_class_is_a_member() {
        assert!(glob_match("]", "[]]"));
        assert!(glob_match("x", "[!]]"));
        assert!(!glob_match("]", "[!]]"));
    }

    #[test]
    fn backslash_is_an_ordinary_character() {
        assert!(glob_match("CIS\\", "CIS\\"));
        assert!(glob_match("a\\b", "a?b"));
    }

    #[test]
    fn uncompilable_pattern_falls_back_to_equality() {
        assert!(Pattern::try_new("CIS-[9-0]").is_err());
        assert!(glob_match("CIS-[9-0]", "CIS-[9-0]"));
        assert!(!glob_match("CIS-5", "CIS-[9-0]"));
    }

    #[test]
    fn tag_filters() {
        let p = Pattern::new("CIS-1.*");
        assert!(p.is_match("CIS-1.6.2"));
        assert!(!p.is_match("CIS-2.1"));
        assert_eq!(p.as_str(), "CIS-1.*");
    }
}
