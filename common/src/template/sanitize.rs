use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_-]").expect("Alias name pattern is valid")
});

/// Replace every character Lambda does not accept in an alias name with a hyphen
pub fn alias_name(name: &str) -> String {
    DISALLOWED.replace_all(name, "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_becomes_hyphen() {
        assert_eq!(alias_name("feature/x"), "feature-x");
    }

    #[test]
    fn allowed_characters_are_kept() {
        assert_eq!(alias_name("prod_v2-Blue"), "prod_v2-Blue");
    }

    #[test]
    fn every_disallowed_character_is_replaced() {
        assert_eq!(alias_name("a.b c@d"), "a-b-c-d");
        assert_eq!(alias_name("ünï"), "-n-");
    }
}
