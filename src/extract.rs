//! Line-oriented import statement extraction.
//!
//! No tokenizer: a commented-out or templated `import` line is still a
//! candidate. An import whose first line leaves a `{` open is joined up to the
//! closing brace so the locator on the `from` line is the one the parser sees.

use std::borrow::Cow;
use std::str::SplitInclusive;

use crate::locator::is_multiline_start;

/// Lazy, single-pass iterator over import statement candidates in source order.
pub struct ImportStatements<'a> {
    lines: SplitInclusive<'a, char>,
}

/// Scan `source` for import statements.
pub fn import_statements(source: &str) -> ImportStatements<'_> {
    ImportStatements {
        lines: source.split_inclusive('\n'),
    }
}

/// `import` followed by something that can start an import clause.
/// Excludes `import(` (dynamic) and `import.meta`, and identifiers like `important`.
fn is_import_line(line: &str) -> bool {
    let Some(rest) = line.trim_start().strip_prefix("import") else {
        return false;
    };
    match rest.chars().next() {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '{' | '*' | '\'' | '"'),
    }
}

/// `import {` alone, or a clause like `import {a,` whose last `{` is not closed.
/// Only the text before the first quote counts, so a `{` after the locator does not.
fn opens_block(line: &str) -> bool {
    let clause = line.split(['\'', '"']).next().unwrap_or(line);
    is_multiline_start(line) || clause.rfind('{').is_some_and(|i| !clause[i..].contains('}'))
}

impl<'a> Iterator for ImportStatements<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.by_ref().find(|l| is_import_line(l))?;
        if !opens_block(line) {
            return Some(Cow::Borrowed(line));
        }

        let mut statement = line.trim_end().to_string();
        for body in self.lines.by_ref() {
            statement.push(' ');
            statement.push_str(body.trim());
            if body.contains('}') {
                break;
            }
        }
        statement.push('\n');
        Some(Cow::Owned(statement))
    }
}
