//! # Pattern Validation
//!
//! This module validates regex flags and compiles the user supplied pattern.
//!
//! Flags follow the familiar single letter notation used by CI regex inputs:
//!
//! | Flag | Effect                                              |
//! |------|-----------------------------------------------------|
//! | `g`  | global; the message is always searched, no effect   |
//! | `i`  | case-insensitive matching                           |
//! | `m`  | `^` and `$` match at line boundaries                |
//! | `s`  | `.` matches new lines                               |
//! | `u`  | unicode aware matching (always on)                  |
//! | `y`  | sticky; the match must start at the first character |
//!
//! Duplicate flags are accepted.
//!
//! Both `\n` and `\r\n` end a line, so `$` matches before `\r\n` and `.` never
//! matches `\r` unless `s` is set. Because `u` is always on, the classes `\d`,
//! `\w`, `\s` and `\b` are Unicode aware whether or not `u` is given: `\d`
//! matches `٣` as well as `3`. Write `[0-9]` for ASCII digits only.
//!
//! Patterns using look-around (`(?=`, `(?!`, `(?<=`, `(?<!`) or backreferences
//! are compiled with a backtracking engine. All other patterns use the linear
//! time engine of the `regex` crate.

use std::borrow::Cow;

use regex::RegexBuilder;
use tracing::debug;

use crate::config::{DEFAULT_FLAGS, VALID_FLAGS_REGEX};
use crate::errors::CommitCheckerError;

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;

/// Validates that `flags` only contains characters from
/// [`ALLOWED_FLAGS`](crate::config::ALLOWED_FLAGS).
///
/// # Errors
///
/// Returns [`CommitCheckerError::InvalidFlags`] carrying every invalid
/// character, in order of appearance and including duplicates.
///
/// # Examples
///
/// ```
/// use commit_message_checker_core::pattern::validate_flags;
///
/// assert!(validate_flags("gim").is_ok());
///
/// let err = validate_flags("abcdefgh").unwrap_err();
/// assert_eq!(err.to_string(), "FLAGS contains invalid characters \"abcdefh\".");
/// ```
pub fn validate_flags(flags: &str) -> Result<(), CommitCheckerError> {
    let invalid = VALID_FLAGS_REGEX.replace_all(flags, "");
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(CommitCheckerError::InvalidFlags(invalid.into_owned()))
    }
}

/// A compiled pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    engine: Engine,
}

#[derive(Debug, Clone)]
enum Engine {
    Standard(regex::Regex),

    /// Look-around and backreferences. Matched against messages with `\r\n`
    /// folded to `\n`.
    Backtracking(fancy_regex::Regex),
}

impl Pattern {
    /// Compiles `pattern` with `flags` applied. Empty flags fall back to
    /// [`DEFAULT_FLAGS`].
    ///
    /// # Errors
    ///
    /// - [`CommitCheckerError::InvalidFlags`] if `flags` is invalid
    /// - [`CommitCheckerError::PatternSyntax`] if `pattern` does not compile
    pub fn compile(pattern: &str, flags: &str) -> Result<Self, CommitCheckerError> {
        validate_flags(flags)?;

        let flags = if flags.is_empty() {
            DEFAULT_FLAGS
        } else {
            flags
        };

        let source = if flags.contains('y') {
            format!(r"\A(?:{})", pattern)
        } else {
            pattern.to_string()
        };

        let standard = RegexBuilder::new(&source)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .crlf(true)
            .unicode(true)
            .build();

        match standard {
            Ok(regex) => Ok(Self {
                engine: Engine::Standard(regex),
            }),
            Err(err) => match fancy_regex::Regex::new(&backtracking_source(&source, flags)) {
                Ok(regex) => {
                    debug!(pattern, "Using the backtracking engine for the pattern");
                    Ok(Self {
                        engine: Engine::Backtracking(regex),
                    })
                }
                Err(_) => Err(CommitCheckerError::PatternSyntax(err)),
            },
        }
    }

    /// Returns `true` if the pattern matches anywhere in `message`.
    ///
    /// # Errors
    ///
    /// Returns [`CommitCheckerError::PatternEvaluation`] if a backtracking
    /// pattern exceeds its backtrack limit on `message`.
    pub fn is_match(&self, message: &str) -> Result<bool, CommitCheckerError> {
        match &self.engine {
            Engine::Standard(regex) => Ok(regex.is_match(message)),
            Engine::Backtracking(regex) => Ok(regex.is_match(&fold_crlf(message))?),
        }
    }
}

/// Prefixes `source` with the inline form of the `i`, `m` and `s` flags.
fn backtracking_source(source: &str, flags: &str) -> String {
    let inline: String = ['i', 'm', 's']
        .into_iter()
        .filter(|flag| flags.contains(*flag))
        .collect();

    if inline.is_empty() {
        source.to_string()
    } else {
        format!("(?{}){}", inline, source)
    }
}

fn fold_crlf(message: &str) -> Cow<'_, str> {
    if message.contains("\r\n") {
        Cow::Owned(message.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(message)
    }
}

/// Checks `message` against `pattern` compiled with `flags`.
///
/// # Examples
///
/// ```
/// use commit_message_checker_core::pattern::matches;
///
/// assert!(matches("fix: typo\n\nCloses #1", "^Closes #\\d+$", "gm").unwrap());
/// assert!(!matches("fix: typo", "^feat", "").unwrap());
/// assert!(matches("feat: x", "^(?!WIP)", "").unwrap());
/// ```
pub fn matches(message: &str, pattern: &str, flags: &str) -> Result<bool, CommitCheckerError> {
    Pattern::compile(pattern, flags)?.is_match(message)
}
