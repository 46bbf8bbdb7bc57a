//! Locator extraction from a single raw import statement.
//!
//! This is a token heuristic, not a grammar: the locator is assumed to be the
//! last whitespace-delimited token, which holds for `import x from "y"` and
//! `import "y"`.

/// A candidate import line that yields no locator.
///
/// Callers log and skip the line, so the cause is kept opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseError {}

fn strip_line_terminator(line: &str) -> &str {
    line.strip_suffix('\n')
        .map_or(line, |l| l.strip_suffix('\r').unwrap_or(l))
}

/// Extract the locator referenced by an import statement.
pub fn parse_locator(line: &str) -> Result<String, ParseError> {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Err(ParseError::new("empty import line"));
    };
    let Some(last) = tokens.last() else {
        return Err(ParseError::new(format!(
            "no locator after '{first}': expected whitespace-separated tokens"
        )));
    };

    let token = strip_line_terminator(last);
    let token = token.strip_suffix(';').unwrap_or(token);
    let locator: String = token.chars().filter(|c| !matches!(c, '\'' | '"')).collect();

    if locator.is_empty() {
        return Err(ParseError::new(format!("empty locator in '{}'", line.trim())));
    }
    Ok(locator)
}

/// Whether `line` opens a multi-line import body (`import {` then newline).
pub fn is_multiline_start(line: &str) -> bool {
    let body = strip_line_terminator(line);
    body.len() != line.len() && body.trim_end().ends_with('{')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_import_double_quotes() {
        assert_eq!(parse_locator(r#"import X from "./a/b";"#).unwrap(), "./a/b");
    }

    #[test]
    fn default_import_single_quotes() {
        assert_eq!(parse_locator("import X from './a/b';").unwrap(), "./a/b");
    }

    #[test]
    fn side_effect_import() {
        assert_eq!(parse_locator("import \"./polyfill\";\n").unwrap(), "./polyfill");
    }

    #[test]
    fn crlf_and_no_semicolon() {
        assert_eq!(parse_locator("import React from 'react'\r\n").unwrap(), "react");
    }

    #[test]
    fn only_one_semicolon_stripped() {
        assert_eq!(parse_locator("import a from 'x';;").unwrap(), "x;");
    }

    #[test]
    fn named_imports_take_last_token() {
        assert_eq!(
            parse_locator("import { a, b } from \"lodash/fp\";").unwrap(),
            "lodash/fp"
        );
    }

    #[test]
    fn no_whitespace_is_parse_error() {
        let err = parse_locator("import\"./x\";").unwrap_err();
        assert!(err.to_string().contains("no locator"), "got: {err}");
    }

    #[test]
    fn bare_quotes_is_parse_error() {
        assert!(parse_locator("import '';").is_err());
    }

    #[test]
    fn blank_line_is_parse_error() {
        assert!(parse_locator("   \n").is_err());
    }

    #[test]
    fn multiline_start_detection() {
        assert!(is_multiline_start("import {\n"));
        assert!(is_multiline_start("import {  \r\n"));
        assert!(!is_multiline_start("import {"));
        assert!(!is_multiline_start("import { a } from './a';\n"));
    }
}
