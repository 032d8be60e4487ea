//! Pluralization used by the default type-derivation path.
//!
//! A relationship named `address` becomes the resource type `addresses`
//! unless the config disables pluralization or supplies a type hook.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("person", "people"),
        ("man", "men"),
        ("woman", "women"),
        ("child", "children"),
        ("foot", "feet"),
        ("tooth", "teeth"),
        ("goose", "geese"),
    ])
});

static UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "news",
];

static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)(quiz)$", "${1}zes"),
        (r"(?i)(ox)$", "${1}en"),
        (r"(?i)([ml])ouse$", "${1}ice"),
        (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
        (r"(?i)(x|ch|ss|sh)$", "${1}es"),
        (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
        (r"(?i)(hive)$", "${1}s"),
        (r"(?i)([^f])fe$", "${1}ves"),
        (r"(?i)([lr])f$", "${1}ves"),
        (r"(?i)sis$", "ses"),
        (r"(?i)([ti])um$", "${1}a"),
        (r"(?i)(buffal|tomat)o$", "${1}oes"),
        (r"(?i)(bu)s$", "${1}ses"),
        (r"(?i)(alias|status)$", "${1}es"),
        (r"(?i)(octop|vir)us$", "${1}i"),
        (r"(?i)(ax|test)is$", "${1}es"),
        (r"(?i)s$", "s"),
        (r"$", "s"),
    ]
    .iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
    .collect()
});

/// Return the plural form of a (singular) collection or relationship name
pub fn pluralize(name: &str) -> String {
    if name.is_empty() || UNCOUNTABLE.contains(&name) {
        return name.to_string();
    }
    if let Some(plural) = IRREGULAR.get(name) {
        return plural.to_string();
    }
    for (rule, replacement) in RULES.iter() {
        if rule.is_match(name) {
            return rule.replace(name, *replacement).into_owned();
        }
    }
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_forms() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("company"), "companies");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("wolf"), "wolves");
        assert_eq!(pluralize("knife"), "knives");
        assert_eq!(pluralize("analysis"), "analyses");
        assert_eq!(pluralize("medium"), "media");
    }

    #[test]
    fn test_irregular_and_uncountable() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("child"), "children");
        assert_eq!(pluralize("sheep"), "sheep");
        assert_eq!(pluralize("series"), "series");
    }

    #[test]
    fn test_already_plural_is_stable() {
        assert_eq!(pluralize("users"), "users");
        assert_eq!(pluralize("addresses"), "addresses");
    }
}
