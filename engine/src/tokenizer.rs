use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)[\p{Alphabetic}\p{M}\p{N}]+").expect("valid regex");
}

/// Tokenize text into terms using NFKC normalization and lowercasing, splitting on any run of
/// characters that are not alphabetic, a combining mark or a digit. Combining marks stay attached
/// so words in abugida scripts keep their vowel signs. Terms come back in input order, duplicates kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    RE.find_iter(&normalized).map(|m| m.as_str().to_string()).collect()
}

/// Normalize a single query word. Returns `None` unless the word is exactly one term.
pub fn normalize_word(word: &str) -> Option<String> {
    let mut terms = tokenize(word).into_iter();
    match (terms.next(), terms.next()) {
        (Some(term), None) => Some(term),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Cats, and DOGS!");
        assert_eq!(t, vec!["cats", "and", "dogs"]);
    }

    #[test]
    fn keeps_digits_and_duplicates() {
        let t = tokenize("route 66 -- route66 route");
        assert_eq!(t, vec!["route", "66", "route66", "route"]);
    }

    #[test]
    fn underscores_split_terms() {
        assert_eq!(tokenize("nonexistent_term"), vec!["nonexistent", "term"]);
        assert_eq!(normalize_word("nonexistent_term"), None);
        assert_eq!(normalize_word("(Dogs)"), Some("dogs".to_string()));
        assert_eq!(normalize_word("---"), None);
    }
}
