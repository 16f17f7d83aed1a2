//! Executable statements with positional arguments.

use crate::values::UniversalValue;
use std::fmt;

/// SQL text plus the positional arguments bound to its `?` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<UniversalValue>,
}

impl Statement {
    /// Create a statement with bound arguments.
    pub fn new(sql: impl Into<String>, args: Vec<UniversalValue>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// Create a statement that takes no arguments.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }

    /// Number of `?` placeholders in the SQL text.
    ///
    /// Only counts placeholders outside of quoted literals and identifiers.
    pub fn placeholder_count(&self) -> usize {
        let mut count = 0;
        let mut quote: Option<char> = None;
        for c in self.sql.chars() {
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '\'' | '"' | '`') => quote = Some(c),
                (None, '?') => count += 1,
                (None, _) => {}
            }
        }
        count
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Long bulk statements are truncated for log output
        const MAX: usize = 120;
        if self.sql.len() > MAX {
            let mut end = MAX;
            while !self.sql.is_char_boundary(end) {
                end -= 1;
            }
            write!(f, "{}... ({} args)", &self.sql[..end], self.args.len())
        } else {
            write!(f, "{} ({} args)", self.sql, self.args.len())
        }
    }
}
