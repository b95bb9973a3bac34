use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref STOPWORDS: HashSet<&'static str> =
        ["a", "the", "is", "are", "were", "and"].iter().copied().collect();
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Tokenize review text into lowercase, ASCII-letter-only terms with
/// stopwords removed. Punctuation and digits are stripped in place, so
/// "top-notch!" becomes "topnotch". The iterator is lazy; call again on the
/// same text to restart.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().filter_map(|piece| {
        let token: String = piece
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if token.is_empty() || is_stopword(&token) {
            None
        } else {
            Some(token)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(text: &str) -> Vec<String> {
        tokenize(text).collect()
    }

    #[test]
    fn strips_punctuation_within_a_token() {
        assert_eq!(terms("top-notch!"), ["topnotch"]);
    }

    #[test]
    fn lowercases_and_drops_stopwords() {
        assert_eq!(
            terms("Great stay and great service"),
            ["great", "stay", "great", "service"]
        );
    }

    #[test]
    fn stopword_and_punctuation_only_text_yields_nothing() {
        assert!(terms("the a and ... !!! 123").is_empty());
        assert!(terms("").is_empty());
    }

    #[test]
    fn retokenizing_normalized_output_is_a_fixed_point() {
        let first = terms("The rooms were SPOTLESS, truly top-notch!");
        let rejoined = first.join(" ");
        assert_eq!(terms(&rejoined), first);
    }
}
