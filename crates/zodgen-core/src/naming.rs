//! Validator naming.
//!
//! The default maps a TypeScript identifier to `lowerCamelCase + "Schema"`.
//! Callers can plug in any `Fn(&str) -> String` instead.

/// Suffix appended by the default naming function.
pub const DEFAULT_SUFFIX: &str = "Schema";

/// A pluggable identifier-to-validator-name function.
pub type SchemaNamer = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Default `getSchemaName`: `MyType` → `myTypeSchema`.
pub fn default_schema_name(identifier: &str) -> String {
    format!("{}{}", to_camel_case(identifier), DEFAULT_SUFFIX)
}

/// Build a namer that wraps the camel-cased identifier in a prefix and suffix.
///
/// With a non-empty prefix the identifier keeps an upper-case first letter,
/// so `("validate", "")` maps `User` to `validateUser`.
pub fn affix_namer(prefix: &str, suffix: &str) -> SchemaNamer {
    let prefix = prefix.to_string();
    let suffix = suffix.to_string();
    Box::new(move |identifier: &str| {
        let camel = to_camel_case(identifier);
        if prefix.is_empty() {
            format!("{camel}{suffix}")
        } else {
            format!("{prefix}{}{suffix}", capitalize(&camel))
        }
    })
}

/// Convert an identifier to lowerCamelCase.
///
/// Word boundaries are separators (`_`, `-`, `$`, space), a lower-case letter
/// or digit followed by an upper-case letter, and the last capital of an
/// acronym followed by a lower-case letter (`HTTPRequest` → `http`, `Request`).
pub fn to_camel_case(identifier: &str) -> String {
    let words = split_words(identifier);
    let mut out = String::with_capacity(identifier.len());
    for (i, word) in words.iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
        } else {
            out.push_str(&capitalize(&lower));
        }
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn split_words(identifier: &str) -> Vec<String> {
    let chars: Vec<char> = identifier.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | '$' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
