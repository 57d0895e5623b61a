use thiserror::Error;
use url::Url;

pub const MIN_INPUT_CHARS: usize = 10;
pub const MAX_INPUT_CHARS: usize = 5000;

const SUPPORTED_LANGUAGES: &[&str] = &[
    "auto", "en", "es", "fr", "de", "it", "pt", "ru", "zh", "ja", "ko", "ar", "hi", "nl", "sv",
    "da", "no",
];

const UNSAFE_MARKERS: &[&str] = &["javascript:", "vbscript:", "onload=", "onerror=", "onclick="];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Input cannot be empty")]
    Empty,
    #[error("Input must be at least 10 characters long")]
    TooShort,
    #[error("Input must be less than 5000 characters")]
    TooLong,
    #[error("Input contains potentially unsafe content")]
    Unsafe,
    #[error("Invalid URL format")]
    InvalidUrl,
}

/// Checks a claim or URL before it is sent for verification and returns it trimmed.
pub fn validate_input(input: &str) -> Result<&str, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if trimmed.chars().count() < MIN_INPUT_CHARS {
        return Err(ValidationError::TooShort);
    }
    if trimmed.chars().count() > MAX_INPUT_CHARS {
        return Err(ValidationError::TooLong);
    }
    if contains_unsafe_markup(input) {
        return Err(ValidationError::Unsafe);
    }
    if looks_like_url(trimmed) && !is_valid_url(trimmed) {
        return Err(ValidationError::InvalidUrl);
    }
    Ok(trimmed)
}

pub fn looks_like_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn is_valid_url(input: &str) -> bool {
    if input.chars().any(char::is_whitespace) {
        return false;
    }
    match Url::parse(input) {
        Ok(url) => url.host_str().is_some_and(|host| !host.is_empty()),
        Err(_) => false,
    }
}

fn contains_unsafe_markup(input: &str) -> bool {
    let lowered = input.to_lowercase();
    if UNSAFE_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        return true;
    }
    // A script element only counts when it opens and closes on one line.
    lowered.split('\n').any(|line| {
        line.find("<script").is_some_and(|start| line[start..].contains("</script>"))
    })
}

pub fn is_supported_language(code: &str) -> bool {
    let code = code.trim().to_lowercase();
    SUPPORTED_LANGUAGES.contains(&code.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_claims_and_trims() {
        assert_eq!(
            validate_input("  Vaccines cause autism  "),
            Ok("Vaccines cause autism")
        );
    }

    #[test]
    fn rejects_empty_and_short_input() {
        assert_eq!(validate_input("   "), Err(ValidationError::Empty));
        assert_eq!(validate_input("too short"), Err(ValidationError::TooShort));
    }

    #[test]
    fn rejects_long_input() {
        let long = "a".repeat(MAX_INPUT_CHARS + 1);
        assert_eq!(validate_input(&long), Err(ValidationError::TooLong));
        assert!(validate_input(&"a".repeat(MAX_INPUT_CHARS)).is_ok());
    }

    #[test]
    fn length_limit_ignores_surrounding_whitespace() {
        let padded = format!("Garlic cures the common cold{}", " ".repeat(MAX_INPUT_CHARS));
        assert_eq!(validate_input(&padded), Ok("Garlic cures the common cold"));
    }

    #[test]
    fn rejects_unsafe_markup() {
        assert_eq!(
            validate_input("claim <SCRIPT>alert(1)</script>"),
            Err(ValidationError::Unsafe)
        );
        assert_eq!(
            validate_input("see JavaScript:void(0) for details"),
            Err(ValidationError::Unsafe)
        );
        assert!(validate_input("a <script tag without closing").is_ok());
    }

    #[test]
    fn script_tags_must_close_on_the_same_line() {
        assert!(validate_input("quoted <script>\nthen later </script> text").is_ok());
        assert_eq!(
            validate_input("first line\nsecond <script src=x></script>"),
            Err(ValidationError::Unsafe)
        );
    }

    #[test]
    fn validates_urls() {
        assert!(validate_input("https://www.who.int/news/item/1").is_ok());
        assert_eq!(
            validate_input("https:// not a url at all"),
            Err(ValidationError::InvalidUrl)
        );
        assert_eq!(validate_input("https://:8080/claims"), Err(ValidationError::InvalidUrl));
    }

    #[test]
    fn knows_supported_languages() {
        assert!(is_supported_language("auto"));
        assert!(is_supported_language("ES"));
        assert!(!is_supported_language("xx"));
    }
}
