// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc,
          time::{Duration, Instant}};

use regex::{Regex, RegexBuilder};

use super::{ConfigError, RestrictError};

/// Predicate a [`CharPattern`] evaluates against each key press, rendered as a one
/// character string. [`Regex`] is the production implementation.
pub trait CharMatcher: Send + Sync {
    fn is_match(&self, haystack: &str) -> bool;

    /// Source text of the pattern, for diagnostics.
    fn pattern(&self) -> &str;
}

impl CharMatcher for Regex {
    fn is_match(&self, haystack: &str) -> bool { Regex::is_match(self, haystack) }

    fn pattern(&self) -> &str { self.as_str() }
}

/// Flags applied when compiling a pattern. [`Default`] turns everything off except
/// Unicode support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct PatternOptions {
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries.
    pub multi_line: bool,
    /// `.` matches `\n` too.
    pub dot_matches_new_line: bool,
    /// Whitespace in the pattern is ignored and `#` starts a comment.
    pub ignore_whitespace: bool,
    pub unicode: bool,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            ignore_whitespace: false,
            unicode: true,
        }
    }
}

/// A compiled pattern that decides, one character at a time, what a reader accepts,
/// with an optional time budget per evaluation.
///
/// The budget is checked once the match returns: an evaluation that took longer than
/// `timeout` fails with [`RestrictError::MatchTimeout`] instead of producing a verdict.
/// [`Regex`] matches in linear time, so with a real pattern this only fires on very
/// slow machines or tiny budgets. Custom [`CharMatcher`]s may be slower.
#[derive(Clone)]
pub struct CharPattern {
    matcher: Arc<dyn CharMatcher>,
    timeout: Option<Duration>,
}

impl CharPattern {
    /// Compile `pattern` with `options`.
    ///
    /// ```
    /// use restricted_readline::{CharPattern, PatternOptions};
    ///
    /// let digits = CharPattern::try_new("^[0-9]$", PatternOptions::default(), None).unwrap();
    /// assert!(digits.is_match('7').unwrap());
    /// assert!(!digits.is_match('x').unwrap());
    /// ```
    ///
    /// # Errors
    ///
    /// [`RestrictError::Configuration`] if `timeout` is zero, or
    /// [`RestrictError::InvalidPattern`] if the pattern does not compile.
    pub fn try_new(
        pattern: &str,
        options: PatternOptions,
        timeout: Option<Duration>,
    ) -> Result<Self, RestrictError> {
        check_timeout(timeout)?;

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(options.case_insensitive)
            .multi_line(options.multi_line)
            .dot_matches_new_line(options.dot_matches_new_line)
            .ignore_whitespace(options.ignore_whitespace)
            .unicode(options.unicode)
            .build()?;

        Ok(Self {
            matcher: Arc::new(regex),
            timeout,
        })
    }

    /// Wrap a matcher that was built elsewhere.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroMatchTimeout`] if `timeout` is zero.
    pub fn from_matcher(
        matcher: impl CharMatcher + 'static,
        timeout: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        check_timeout(timeout)?;
        Ok(Self {
            matcher: Arc::new(matcher),
            timeout,
        })
    }

    #[must_use]
    pub fn pattern(&self) -> &str { self.matcher.pattern() }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> { self.timeout }

    /// Evaluate the pattern against `ch` alone, never against the text typed so far.
    ///
    /// # Errors
    ///
    /// [`RestrictError::MatchTimeout`] if the evaluation ran past the timeout.
    pub fn is_match(&self, ch: char) -> Result<bool, RestrictError> {
        let mut encoded = [0_u8; 4];
        let haystack = ch.encode_utf8(&mut encoded);

        let start = Instant::now();
        let is_match = self.matcher.is_match(haystack);
        let elapsed = start.elapsed();

        match self.timeout {
            Some(timeout) if elapsed > timeout => Err(RestrictError::MatchTimeout {
                pattern: self.pattern().to_string(),
                timeout,
                elapsed,
            }),
            _ => Ok(is_match),
        }
    }
}

fn check_timeout(timeout: Option<Duration>) -> Result<(), ConfigError> {
    match timeout {
        Some(it) if it.is_zero() => Err(ConfigError::ZeroMatchTimeout),
        _ => Ok(()),
    }
}

impl Debug for CharPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharPattern")
            .field("pattern", &self.pattern())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    struct SlowMatcher(Duration);

    impl CharMatcher for SlowMatcher {
        fn is_match(&self, _: &str) -> bool {
            std::thread::sleep(self.0);
            true
        }

        fn pattern(&self) -> &str { "(a+)+$" }
    }

    #[test_case('0', true)]
    #[test_case('9', true)]
    #[test_case('a', false)]
    #[test_case('\r', false)]
    fn test_single_digit(ch: char, expected: bool) {
        let pattern = CharPattern::try_new("^[0-9]$", PatternOptions::default(), None).unwrap();
        assert_eq!(pattern.is_match(ch).unwrap(), expected);
    }

    #[test]
    fn test_case_insensitive_option() {
        let options = PatternOptions {
            case_insensitive: true,
            ..Default::default()
        };
        let pattern = CharPattern::try_new("[a-f]", options, None).unwrap();
        assert!(pattern.is_match('C').unwrap());
    }

    #[test]
    fn test_ignore_whitespace_option() {
        let options = PatternOptions {
            ignore_whitespace: true,
            ..Default::default()
        };
        let pattern = CharPattern::try_new("^ [xyz] $  # comment", options, None).unwrap();
        assert!(pattern.is_match('y').unwrap());
        assert!(!pattern.is_match(' ').unwrap());
    }

    #[test]
    fn test_dot_matches_new_line_option() {
        let strict = CharPattern::try_new(".", PatternOptions::default(), None).unwrap();
        assert!(!strict.is_match('\n').unwrap());

        let options = PatternOptions {
            dot_matches_new_line: true,
            ..Default::default()
        };
        let lenient = CharPattern::try_new(".", options, None).unwrap();
        assert!(lenient.is_match('\n').unwrap());
    }

    #[test]
    fn test_pattern_is_matched_against_one_char() {
        let pattern = CharPattern::try_new("^ab$", PatternOptions::default(), None).unwrap();
        assert!(!pattern.is_match('a').unwrap());
        assert!(!pattern.is_match('b').unwrap());
    }

    #[test]
    fn test_invalid_pattern() {
        let result = CharPattern::try_new("[0-9", PatternOptions::default(), None);
        assert!(matches!(result, Err(RestrictError::InvalidPattern(_))));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = CharPattern::try_new("x", PatternOptions::default(), Some(Duration::ZERO));
        assert!(matches!(
            result,
            Err(RestrictError::Configuration(ConfigError::ZeroMatchTimeout))
        ));

        let result = CharPattern::from_matcher(SlowMatcher(Duration::ZERO), Some(Duration::ZERO));
        assert_eq!(result.unwrap_err(), ConfigError::ZeroMatchTimeout);
    }

    #[test]
    fn test_slow_match_times_out() {
        let pattern = CharPattern::from_matcher(
            SlowMatcher(Duration::from_millis(20)),
            Some(Duration::from_millis(1)),
        )
        .unwrap();

        let error = pattern.is_match('a').unwrap_err();
        let RestrictError::MatchTimeout {
            pattern: text,
            timeout,
            elapsed,
        } = &error
        else {
            panic!("expected a timeout, got {error:?}");
        };
        assert_eq!(text, "(a+)+$");
        assert_eq!(*timeout, Duration::from_millis(1));
        assert!(*elapsed >= Duration::from_millis(20));
    }

    #[test]
    fn test_generous_timeout_allows_match() {
        let pattern = CharPattern::try_new(
            "[a-z]",
            PatternOptions::default(),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert!(pattern.is_match('q').unwrap());
        assert_eq!(pattern.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(pattern.pattern(), "[a-z]");
    }
}
