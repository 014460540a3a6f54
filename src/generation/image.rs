use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::constants::generation::KEYWORD_IMAGE_BASE;

/// Background image URI for a keyword suggested by the model.
///
/// Pure templating; the URI is resolved by whatever displays the slide.
pub fn image_for_keyword(keyword: &str) -> String {
    let encoded = utf8_percent_encode(keyword.trim(), NON_ALPHANUMERIC);
    format!("{KEYWORD_IMAGE_BASE}?{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_keyword_as_query() {
        assert_eq!(
            image_for_keyword("coffee"),
            "https://source.unsplash.com/1600x900/?coffee"
        );
        assert_eq!(
            image_for_keyword(" beach & sun "),
            "https://source.unsplash.com/1600x900/?beach%20%26%20sun"
        );
    }
}
