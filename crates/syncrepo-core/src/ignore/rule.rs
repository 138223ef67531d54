//! A single exclusion rule and its glob-to-regex translation

use regex::Regex;

/// One line of an exclusion file.
///
/// The pattern is compiled once at construction. Matching is case-sensitive
/// and works on forward-slash relative paths.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    /// Pattern text with `!` and trailing `/` removed
    pattern: String,
    /// Rule re-includes matching paths
    negate: bool,
    /// Pattern had a trailing `/`
    directory_only: bool,
    matcher: Regex,
}

impl IgnoreRule {
    pub fn new(pattern: impl Into<String>, negate: bool, directory_only: bool) -> Self {
        let pattern = pattern.into();
        let matcher = compile(&pattern);
        Self {
            pattern,
            negate,
            directory_only,
            matcher,
        }
    }

    /// Parse one line of an exclusion file.
    ///
    /// Returns `None` for blank lines, comments, and lines that are empty
    /// once the `!` and trailing `/` markers are stripped.
    pub fn parse_line(line: &str) -> Option<Self> {
        // `#` starts a comment anywhere on the line; there is no escaping
        let line = match line.find('#') {
            Some(idx) => &line[..idx],
            None => line,
        };
        let mut line = line.trim();
        if line.is_empty() {
            return None;
        }

        let negate = line.starts_with('!');
        if negate {
            line = line[1..].trim();
        }

        let directory_only = line.ends_with('/');
        if directory_only {
            line = &line[..line.len() - 1];
        }

        if line.is_empty() {
            return None;
        }

        Some(Self::new(line, negate, directory_only))
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn negate(&self) -> bool {
        self.negate
    }

    pub fn directory_only(&self) -> bool {
        self.directory_only
    }

    /// Whether `path` (relative, either separator) matches this rule.
    pub fn matches(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");
        self.matcher.is_match(normalized.trim_start_matches('/'))
    }
}

impl PartialEq for IgnoreRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.negate == other.negate
            && self.directory_only == other.directory_only
    }
}

impl Eq for IgnoreRule {}

/// Build the matcher for a pattern.
///
/// A leading `/` anchors the pattern at the tree root; otherwise it may start
/// at any segment boundary. A match must end at a segment boundary, and
/// anything nested beneath a matched segment matches too.
fn compile(pattern: &str) -> Regex {
    let (anchored, body) = match pattern.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    };
    let start = if anchored { "^" } else { "^(?:.*/)?" };

    let source = format!("{}{}(?:/.*)?$", start, translate(body));
    Regex::new(&source).unwrap_or_else(|e| {
        tracing::warn!(pattern, error = %e, "Invalid ignore pattern; matching it literally");
        let literal = format!("{}{}(?:/.*)?$", start, regex::escape(body));
        Regex::new(&literal).unwrap_or_else(|_| never_matches())
    })
}

fn never_matches() -> Regex {
    // `$^` only matches an empty path, which never reaches the matcher
    Regex::new("$^").unwrap_or_else(|_| unreachable!("static regex compiles"))
}

/// Translate glob syntax to regex syntax.
///
/// `**` crosses separators (`**/` may also match nothing), `*` stays within
/// one segment, `?` is one non-separator character, `[...]` is a character
/// class (`[!...]` negated). Everything else is literal.
fn translate(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                if chars.get(i + 2) == Some(&'/') {
                    out.push_str("(?:.*/)?");
                    i += 3;
                } else {
                    out.push_str(".*");
                    i += 2;
                }
            }
            '*' => {
                out.push_str("[^/]*");
                i += 1;
            }
            '?' => {
                out.push_str("[^/]");
                i += 1;
            }
            '[' => match class(&chars[i..]) {
                Some((regex, consumed)) => {
                    out.push_str(&regex);
                    i += consumed;
                }
                None => {
                    out.push_str(r"\[");
                    i += 1;
                }
            },
            c => {
                out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
                i += 1;
            }
        }
    }

    out
}

/// Translate a bracket expression starting at `chars[0] == '['`.
///
/// Returns the regex class and the number of glob characters consumed, or
/// `None` if the bracket is unterminated.
fn class(chars: &[char]) -> Option<(String, usize)> {
    let mut i = 1;
    let negated = matches!(chars.get(i), Some('!') | Some('^'));
    if negated {
        i += 1;
    }
    let body_start = i;
    // A `]` right after the opening is a literal member
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    while i < chars.len() && chars[i] != ']' {
        i += 1;
    }
    if i >= chars.len() {
        return None;
    }

    let mut regex = String::from(if negated { "[^/" } else { "[" });
    for &c in &chars[body_start..i] {
        if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~') {
            regex.push('\\');
        }
        regex.push(c);
    }
    regex.push(']');
    Some((regex, i + 1))
}
