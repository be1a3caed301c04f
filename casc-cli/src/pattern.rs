//! Glob matching over the virtual file listing a root adapter returns.
//!
//! Root entries are `/`-separated logical paths, not filesystem paths, so
//! they're matched with a hand-rolled glob-to-regex translation rather than
//! the `glob` crate (which only walks a real filesystem).

use regex::Regex;

/// Translate a `*`/`?` glob into an anchored regex. `*` does not cross `/`;
/// `**` does.
fn glob_to_regex(pattern: &str) -> String {
    let mut regex = String::from("^");
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    regex.push_str(".*");
                } else {
                    regex.push_str("[^/]*");
                }
            }
            '?' => regex.push_str("[^/]"),
            other if "^$()[]{}|+.\\".contains(other) => {
                regex.push('\\');
                regex.push(other);
            }
            other => regex.push(other),
        }
    }

    regex.push('$');
    regex
}

/// A compiled glob pattern matched against logical file names.
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(glob: &str) -> Result<Self, regex::Error> {
        Ok(Self(Regex::new(&glob_to_regex(glob))?))
    }

    pub fn matches(&self, name: &str) -> bool {
        self.0.is_match(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_does_not_cross_path_separators() {
        let pattern = Pattern::new("Base/*.ani").unwrap();
        assert!(pattern.matches("Base/MyAnim.ani"));
        assert!(!pattern.matches("Base/Sub/MyAnim.ani"));
    }

    #[test]
    fn double_star_crosses_path_separators() {
        let pattern = Pattern::new("**/*.ogg").unwrap();
        assert!(pattern.matches("Anim/MyAnim/0003.ogg"));
        assert!(pattern.matches("0003.ogg"));
    }

    #[test]
    fn literal_dot_is_escaped() {
        let pattern = Pattern::new("*.mdx").unwrap();
        assert!(pattern.matches("units/footman.mdx"));
        assert!(!pattern.matches("unitsXmdx"));
    }
}
