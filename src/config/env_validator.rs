//! Environment variable validation with helpful error messages
//!
//! Invalid values fall back to a default, with a warning and a
//! Levenshtein-based typo suggestion.

use std::io::Write;

/// Validator for environment variable values
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Parse a value, returning `default` (and a warning on `writer`) if invalid
    pub fn parse_with_writer<T, F, W>(
        &self,
        value: &str,
        parser: F,
        default: T,
        writer: &mut W,
    ) -> T
    where
        F: Fn(&str) -> Option<T>,
        W: Write,
    {
        match parser(value) {
            Some(parsed) => parsed,
            None => {
                let hint = suggest(&value.to_lowercase(), self.valid_values)
                    .map(|s| format!(". Did you mean '{}'?", s))
                    .unwrap_or_default();
                let _ = writeln!(
                    writer,
                    "Warning: Invalid {} value '{}'{}",
                    self.var_name, value, hint
                );
                let _ = writeln!(writer, "Valid values: {}", self.valid_values.join(", "));
                default
            }
        }
    }
}

/// Closest candidate within two edits, if any (exact matches are not suggestions)
pub fn suggest(value: &str, candidates: &[&str]) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;

    for &candidate in candidates {
        let dist = levenshtein(value, candidate);
        match best {
            None => best = Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => best = Some((candidate, dist)),
            _ => {}
        }
    }

    match best {
        Some((candidate, dist)) if dist <= 2 && dist > 0 => Some(candidate.to_string()),
        _ => None,
    }
}

/// Simple Levenshtein distance for typo detection
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let a_len = a_bytes.len();
    let b_len = b_bytes.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("minify", "minify"), 0);
    }

    #[test]
    fn test_levenshtein_one_char_diff() {
        assert_eq!(levenshtein("theme", "theke"), 1);
        assert_eq!(levenshtein("theme", "themes"), 1);
        assert_eq!(levenshtein("themes", "theme"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_suggest_close_match() {
        assert_eq!(
            suggest("prodution", &["production", "development"]),
            Some("production".to_string())
        );
    }

    #[test]
    fn test_suggest_ignores_exact_and_distant() {
        assert_eq!(suggest("production", &["production"]), None);
        assert_eq!(suggest("staging", &["production", "development"]), None);
    }

    #[test]
    fn test_env_validator_valid_value() {
        let validator = EnvVarValidator::new("TEST_VAR", &["foo", "bar"]);
        let mut output = Vec::new();
        let result = validator.parse_with_writer(
            "foo",
            |s| if s == "foo" { Some(1) } else { None },
            0,
            &mut output,
        );
        assert_eq!(result, 1);
        assert!(output.is_empty(), "valid values should not warn");
    }

    #[test]
    fn test_env_validator_warning_message() {
        let validator = EnvVarValidator::new("CSSBUILD_ENV", &["production", "development"]);
        let mut output = Vec::new();
        let result = validator.parse_with_writer("prodution", |_| None::<u8>, 7, &mut output);
        assert_eq!(result, 7, "Should return default for invalid value");

        let msg = String::from_utf8(output).unwrap();
        assert!(msg.contains("Warning:"), "Should contain warning: {}", msg);
        assert!(msg.contains("CSSBUILD_ENV"), "Should mention var name: {}", msg);
        assert!(
            msg.contains("Did you mean 'production'?"),
            "Should suggest correction: {}",
            msg
        );
        assert!(
            msg.contains("Valid values: production, development"),
            "Should list valid values: {}",
            msg
        );
    }
}
