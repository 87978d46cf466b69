//! Rule-file line classification.
//!
//! A rule file is read one physical line at a time, and every line is
//! exactly one of: a rule (`name: dep dep ...`), a tab-indented command
//! belonging to the most recent rule, ignorable (blank or `#` comment), or
//! malformed. Classification is purely lexical; whether the names make
//! sense is the registry's and graph's business.

use crate::types::{MakeError, MakeResult};

/// A single classified line, borrowing from the input.
#[derive(Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// `name: dep dep ...`. The name may be empty and the dependency names
    /// may be dangling; both are judged later.
    Rule {
        name: &'a str,
        dependencies: Vec<&'a str>,
    },
    /// Command text with the leading tab stripped.
    Command(&'a str),
    /// Blank line or full-line comment.
    Ignored,
}

/// Classify one physical line.
///
/// Precedence matters: blank/comment wins over everything, a leading tab
/// makes a command even if the text contains `:`, and only then is a `:`
/// looked for. Anything left over is a format error carrying the offending
/// line.
pub fn classify_line(line: &str) -> MakeResult<Line<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(Line::Ignored);
    }

    if let Some(text) = line.strip_prefix('\t') {
        return Ok(Line::Command(text));
    }

    if let Some((name, dependencies)) = line.split_once(':') {
        return Ok(Line::Rule {
            name: name.trim(),
            dependencies: dependencies.split_whitespace().collect(),
        });
    }

    Err(MakeError::InvalidMakefileFormat {
        line: line.to_string(),
    })
}
