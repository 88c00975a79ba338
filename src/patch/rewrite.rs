//! Ordered text substitutions.
//!
//! Project files we don't own (`.env`, `phpunit.xml`, an already-published
//! compose file) are patched as raw bytes so comments, layout and any
//! non-UTF-8 content survive. Each patcher declares its substitutions as a
//! static table of [`Rewrite`]s, compiled once into a [`RewriteSet`] that runs
//! them in order over the whole file.

use regex::bytes::{NoExpand, Regex, RegexBuilder};

use crate::error::Result;

/// A single substitution over a whole file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    /// Replace every occurrence of `from` with `to`.
    Literal {
        from: &'static str,
        to: &'static str,
    },
    /// Replace every match of `pattern` with `replacement` (no `$` expansion).
    ///
    /// `.` matches any byte except `\n`.
    Pattern {
        pattern: &'static str,
        replacement: &'static str,
    },
}

impl Rewrite {
    fn compile(&self) -> Result<CompiledRewrite> {
        let (pattern, replacement) = match self {
            Self::Literal { from, to } => (regex::escape(from), *to),
            Self::Pattern {
                pattern,
                replacement,
            } => (pattern.to_string(), *replacement),
        };

        let regex = RegexBuilder::new(&pattern)
            .unicode(false)
            .build()
            .map_err(anyhow::Error::from)?;

        Ok(CompiledRewrite { regex, replacement })
    }
}

#[derive(Debug)]
struct CompiledRewrite {
    regex: Regex,
    replacement: &'static str,
}

/// A rule table compiled for repeated use.
#[derive(Debug)]
pub struct RewriteSet {
    rules: Vec<CompiledRewrite>,
}

impl RewriteSet {
    /// Compile `rules`, keeping their order.
    pub fn new(rules: &[Rewrite]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(Rewrite::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Apply every rule to `input` in order.
    pub fn apply(&self, input: &[u8]) -> Vec<u8> {
        self.rules.iter().fold(input.to_vec(), |content, rule| {
            rule.regex
                .replace_all(&content, NoExpand(rule.replacement.as_bytes()))
                .into_owned()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(rules: &[Rewrite], input: &[u8]) -> Vec<u8> {
        RewriteSet::new(rules).unwrap().apply(input)
    }

    #[test]
    fn literal_replaces_every_occurrence() {
        let rule = Rewrite::Literal { from: "a", to: "b" };
        assert_eq!(apply(&[rule], b"a-a-c"), b"b-b-c");
    }

    #[test]
    fn literal_is_not_a_pattern() {
        let rule = Rewrite::Literal {
            from: "DB_HOST=127.0.0.1",
            to: "DB_HOST=pgsql",
        };
        assert_eq!(apply(&[rule], b"DB_HOST=127x0x0x1\n"), b"DB_HOST=127x0x0x1\n");
    }

    #[test]
    fn pattern_replacement_is_not_expanded() {
        let rule = Rewrite::Pattern {
            pattern: r"KEY=(.*)",
            replacement: "KEY=$1-cost",
        };
        assert_eq!(apply(&[rule], b"KEY=value"), b"KEY=$1-cost");
    }

    #[test]
    fn multiline_anchor_only_matches_line_starts() {
        let rule = Rewrite::Pattern {
            pattern: r"(?m)^HOST=(.*)",
            replacement: "HOST=db",
        };
        let output = apply(&[rule], b"HOST=localhost\nVITE_HOST=localhost\n");
        assert_eq!(output, b"HOST=db\nVITE_HOST=localhost\n");
    }

    #[test]
    fn dot_matches_non_utf8_bytes() {
        let rule = Rewrite::Pattern {
            pattern: r"PASSWORD=(.*)",
            replacement: "PASSWORD=secret",
        };
        let output = apply(&[rule], b"PASSWORD=caf\xe9!\nNAME=Caf\xe9\n");
        assert_eq!(output, b"PASSWORD=secret\nNAME=Caf\xe9\n");
    }

    #[test]
    fn rules_run_in_order() {
        let rules = [
            Rewrite::Literal {
                from: "# A=1",
                to: "A=1",
            },
            Rewrite::Literal {
                from: "A=1",
                to: "A=2",
            },
        ];
        assert_eq!(apply(&rules, b"# A=1\n"), b"A=2\n");
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let rule = Rewrite::Pattern {
            pattern: "(",
            replacement: "",
        };
        assert!(RewriteSet::new(&[rule]).is_err());
    }
}
