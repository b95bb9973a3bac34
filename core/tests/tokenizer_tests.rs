use hotelsearch_core::tokenizer::tokenize;

#[test]
fn it_normalizes_to_ascii_lowercase_letters() {
    let toks: Vec<String> = tokenize("Top-Notch!! rooms, 5/5 stars; Wi-Fi worked").collect();
    assert_eq!(toks, ["topnotch", "rooms", "stars", "wifi", "worked"]);
    for tok in &toks {
        assert!(tok.chars().all(|c| c.is_ascii_lowercase()));
    }
}

#[test]
fn it_filters_the_stopword_set() {
    let toks: Vec<String> = tokenize("The beds were clean and the staff a delight is").collect();
    for stop in ["a", "the", "is", "are", "were", "and"] {
        assert!(!toks.iter().any(|t| t == stop));
    }
    assert_eq!(toks, ["beds", "clean", "staff", "delight"]);
}
