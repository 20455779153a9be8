//! Artifact glob expansion

use regex::Regex;
use std::path::{Path, PathBuf};

/// A file-name pattern under a literal directory, e.g. `wheelhouse/*.whl`
///
/// Only the final path component may contain wildcards. They follow shell
/// rules: `*` matches any run of characters, `?` exactly one, `[...]` and
/// `[!...]` a character class. A leading `.` must be matched literally, so
/// `*.whl` does not pick up `.hidden.whl`.
#[derive(Debug, Clone)]
pub struct ArtifactPattern {
    pattern: String,
    dir: PathBuf,
    file_name: Regex,
    match_hidden: bool,
}

impl ArtifactPattern {
    /// Compile a glob pattern
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let path = Path::new(pattern);
        let (dir, name) = match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => (parent.to_path_buf(), name.to_string_lossy().into_owned()),
            _ => (PathBuf::new(), pattern.to_string()),
        };

        Ok(Self {
            pattern: pattern.to_string(),
            dir,
            file_name: Regex::new(&glob_to_regex(&name))?,
            match_hidden: name.starts_with('.'),
        })
    }

    /// The pattern as given
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Directory searched for matches
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Check if a bare file name matches
    pub fn matches(&self, file_name: &str) -> bool {
        if file_name.starts_with('.') && !self.match_hidden {
            return false;
        }
        self.file_name.is_match(file_name)
    }

    /// List matching regular files, sorted by path
    ///
    /// A missing directory yields no matches rather than an error.
    pub fn expand(&self) -> std::io::Result<Vec<PathBuf>> {
        let dir = if self.dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            self.dir.as_path()
        };

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut matches = Vec::new();
        for entry in entries {
            let entry = entry?;
            // Follows symlinks, unlike DirEntry::file_type
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name();
            if self.matches(&name.to_string_lossy()) {
                matches.push(self.dir.join(name));
            }
        }

        matches.sort();
        Ok(matches)
    }
}

/// Translate a single-component glob into an anchored regex
fn glob_to_regex(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() + 8);
    out.push('^');

    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => match bracket_class(&chars[i..]) {
                Some((class, consumed)) => {
                    out.push_str(&class);
                    i += consumed;
                    continue;
                }
                // Unclosed bracket is literal, as in the shell
                None => out.push_str(r"\["),
            },
            other => out.push_str(&regex::escape(&other.to_string())),
        }
        i += 1;
    }

    out.push('$');
    out
}

/// Translate `[...]` / `[!...]` at the start of `chars`.
///
/// Returns the regex class and the number of glob characters consumed, or
/// `None` when there is no closing `]`.
fn bracket_class(chars: &[char]) -> Option<(String, usize)> {
    let mut i = 1;
    let negated = matches!(chars.get(i), Some('!') | Some('^'));
    if negated {
        i += 1;
    }

    // A `]` right after the opening bracket is a member, not the terminator
    let body_start = i;
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    while i < chars.len() && chars[i] != ']' {
        i += 1;
    }
    if i >= chars.len() {
        return None;
    }

    let body = &chars[body_start..i];
    let mut class = String::from(if negated { "[^" } else { "[" });
    for (pos, &ch) in body.iter().enumerate() {
        let is_range = ch == '-' && pos > 0 && pos + 1 < body.len();
        if is_range {
            class.push('-');
        } else {
            class.push_str(&regex::escape(&ch.to_string()));
        }
    }
    class.push(']');

    Some((class, i + 1))
}
