// Accept-Language parsing

/// Language tags of an `Accept-Language` header, in header order.
///
/// Quality parameters are dropped: `en-US,en;q=0.9` yields `["en-US", "en"]`.
pub fn parse_accept_language(input: &str) -> Vec<String> {
    input
        .split(',')
        .filter_map(|part| part.split(';').next())
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accept_language() {
        assert_eq!(
            parse_accept_language("fr-CH, fr;q=0.9, en;q=0.8, de;q=0.7, *;q=0.5"),
            vec!["fr-CH", "fr", "en", "de", "*"]
        );
    }

    #[test]
    fn test_parse_single_tag() {
        assert_eq!(parse_accept_language("ja"), vec!["ja"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_accept_language("").is_empty());
        assert!(parse_accept_language(" , ;q=1").is_empty());
    }
}
