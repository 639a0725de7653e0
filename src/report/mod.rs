mod generator;

pub use generator::ReportGenerator;

use itertools::Itertools;

use crate::error::FatalError;

#[cfg(windows)]
const ILLEGAL_FILE_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '\0'];
#[cfg(not(windows))]
const ILLEGAL_FILE_NAME_CHARS: &[char] = &['/', '\0'];

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum Format {
    Text,
    Csv,
    Chart,
    Html,
}

impl Format {
    pub const DEFAULT_SET: [Format; 4] = [Format::Text, Format::Csv, Format::Chart, Format::Html];
}

/// Normalizes and validates the requested format tokens.
///
/// Every token is trimmed and lowercased. A token containing a character that
/// cannot appear in a file name is fatal on the spot; after that, all
/// unrecognized tokens are reported together. `all` expands to the full set.
/// No tokens at all means the full default set, without validation.
pub fn select_formats(tokens: &[String]) -> Result<Vec<Format>, FatalError> {
    if tokens.is_empty() {
        return Ok(Format::DEFAULT_SET.to_vec());
    }

    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    let mut all = false;
    for raw in tokens {
        let token = raw.trim().to_lowercase();
        let illegal = token
            .chars()
            .filter(|c| ILLEGAL_FILE_NAME_CHARS.contains(c))
            .map(|c| format!("'{c}'"))
            .join(" ");
        if !illegal.is_empty() {
            return Err(FatalError::IllegalFormatToken { token, illegal });
        }
        match token.as_str() {
            "all" => all = true,
            "text" => valid.push(Format::Text),
            "csv" => valid.push(Format::Csv),
            "chart" => valid.push(Format::Chart),
            "html" => valid.push(Format::Html),
            _ => invalid.push(token),
        }
    }

    if !invalid.is_empty() {
        return Err(FatalError::InvalidFormats(invalid));
    }
    if all {
        return Ok(Format::DEFAULT_SET.to_vec());
    }
    Ok(valid.into_iter().unique().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_tokens_defaults_to_the_full_set() {
        assert_eq!(select_formats(&[]).unwrap(), Format::DEFAULT_SET.to_vec());
    }

    #[test]
    fn all_expands_to_the_full_set() {
        assert_eq!(
            select_formats(&tokens(&["ALL"])).unwrap(),
            Format::DEFAULT_SET.to_vec()
        );
        assert_eq!(
            select_formats(&tokens(&["csv", "all"])).unwrap(),
            Format::DEFAULT_SET.to_vec()
        );
    }

    #[test]
    fn tokens_are_trimmed_lowercased_and_deduplicated() {
        assert_eq!(
            select_formats(&tokens(&[" Csv ", "TEXT", "csv"])).unwrap(),
            vec![Format::Csv, Format::Text]
        );
    }

    #[test]
    fn illegal_file_name_character_is_fatal_and_named() {
        let err = select_formats(&tokens(&["te/xt"])).unwrap_err();
        match err {
            FatalError::IllegalFormatToken { token, illegal } => {
                assert_eq!(token, "te/xt");
                assert!(illegal.contains("'/'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unrecognized_tokens_are_all_reported() {
        let err = select_formats(&tokens(&["xml", "csv", "pdf"])).unwrap_err();
        match err {
            FatalError::InvalidFormats(invalid) => {
                assert_eq!(invalid, vec!["xml".to_string(), "pdf".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn illegal_character_takes_precedence_over_invalid_tokens() {
        let err = select_formats(&tokens(&["xml", "te/xt"])).unwrap_err();
        assert!(matches!(err, FatalError::IllegalFormatToken { .. }));
    }
}
