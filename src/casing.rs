//! Key-casing policy applied to attribute, relationship and meta keys.
//!
//! Both directions of the transform run every emitted key through the same
//! policy, so a document serialized and extracted with the same mode keeps
//! stable key names.

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use std::fmt;
use std::sync::Arc;

/// A caller-supplied casing function
pub type KeyCaseFn = dyn Fn(&str) -> String + Send + Sync;

/// Casing mode for wire keys. The default is dash-case, matching the
/// JSON:API recommendation.
#[derive(Clone, Default)]
pub enum KeyCase {
    /// dash-case (also known as kebab/lisp/spinal case)
    #[default]
    Dash,
    /// snake_case
    Underscore,
    /// camelCase
    Camel,
    /// PascalCase
    Pascal,
    /// Caller-supplied function
    Custom(Arc<KeyCaseFn>),
}

impl KeyCase {
    /// Identity casing: keys pass through untouched
    pub fn identity() -> Self {
        KeyCase::Custom(Arc::new(|name: &str| name.to_string()))
    }

    pub fn apply(&self, name: &str) -> String {
        match self {
            KeyCase::Dash => name.to_kebab_case(),
            KeyCase::Underscore => name.to_snake_case(),
            KeyCase::Camel => name.to_lower_camel_case(),
            KeyCase::Pascal => name.to_upper_camel_case(),
            KeyCase::Custom(f) => f(name),
        }
    }
}

impl fmt::Debug for KeyCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCase::Dash => f.write_str("Dash"),
            KeyCase::Underscore => f.write_str("Underscore"),
            KeyCase::Camel => f.write_str("Camel"),
            KeyCase::Pascal => f.write_str("Pascal"),
            KeyCase::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_default() {
        assert_eq!(KeyCase::default().apply("firstName"), "first-name");
        assert_eq!(KeyCase::Dash.apply("addressLine1"), "address-line1");
        // Already-dashed keys are stable
        assert_eq!(KeyCase::Dash.apply("first-name"), "first-name");
    }

    #[test]
    fn test_other_modes() {
        assert_eq!(KeyCase::Underscore.apply("firstName"), "first_name");
        assert_eq!(KeyCase::Camel.apply("first-name"), "firstName");
        assert_eq!(KeyCase::Pascal.apply("first_name"), "FirstName");
    }

    #[test]
    fn test_custom_and_identity() {
        let shout = KeyCase::Custom(Arc::new(|s: &str| s.to_uppercase()));
        assert_eq!(shout.apply("name"), "NAME");
        assert_eq!(KeyCase::identity().apply("first_name"), "first_name");
    }
}
