use pdki_scraper::extract::{parse_class_codes, CLASS_CODE_LABEL};
use proptest::prelude::*;

fn labelled(tokens: &[String]) -> String {
    format!("{} {}", CLASS_CODE_LABEL, tokens.join(", "))
}

proptest! {
    #[test]
    fn short_numeric_lists_are_accepted_in_order(
        prefix in "[A-Za-z ]{0,12}",
        codes in proptest::collection::vec("[0-9]{1,2}", 1..8),
    ) {
        let text = format!("{}{}", prefix, labelled(&codes));
        prop_assert_eq!(parse_class_codes(&text), Some(codes));
    }

    #[test]
    fn one_bad_token_rejects_the_field(
        codes in proptest::collection::vec("[0-9]{1,2}", 0..6),
        bad in prop_oneof!["[0-9]{3,5}", "[a-z][a-z0-9]{0,2}", "[0-9][a-z]"],
        index in any::<prop::sample::Index>(),
    ) {
        let mut tokens = codes;
        let at = index.index(tokens.len() + 1);
        tokens.insert(at, bad);
        prop_assert_eq!(parse_class_codes(&labelled(&tokens)), None);
    }

    #[test]
    fn unlabelled_text_is_rejected(text in "[0-9, ]{0,24}") {
        prop_assert!(parse_class_codes(&text).is_none());
    }
}
