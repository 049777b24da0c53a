//! Naming utilities for Java code generation.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `com.example.Point` | [`simple_name`] | `Point` |
//! | `com.example.Point` | [`package_of`] | `com.example` |
//! | `com.example`, `Point` | [`qualify`] | `com.example.Point` |
//! | `com.example` | [`package_path`] | `com/example` |
//! | `snake_case` | [`to_camel_case`] | `snakeCase` |

use std::path::PathBuf;

/// Last segment of a dotted name.
///
/// # Examples
///
/// ```
/// use moshigen_core::naming::simple_name;
///
/// assert_eq!(simple_name("com.example.Point"), "Point");
/// assert_eq!(simple_name("Point"), "Point");
/// ```
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Everything before the last segment of a dotted name, if there is a dot.
///
/// This is a best guess: nested classes are indistinguishable from
/// packages by name alone.
pub fn package_of(qualified: &str) -> Option<&str> {
    qualified.rsplit_once('.').map(|(package, _)| package)
}

/// Join a package and a simple name; an empty package is the default package.
pub fn qualify(package: &str, simple: &str) -> String {
    if package.is_empty() {
        simple.to_string()
    } else {
        format!("{package}.{simple}")
    }
}

/// Directory of a package relative to a source root
pub fn package_path(package: &str) -> PathBuf {
    package.split('.').filter(|s| !s.is_empty()).collect()
}

/// Convert snake_case to camelCase.
///
/// # Examples
///
/// ```
/// use moshigen_core::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("display_name"), "displayName");
/// assert_eq!(to_camel_case("already"), "already");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '_' {
            capitalize_next = !result.is_empty();
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}
