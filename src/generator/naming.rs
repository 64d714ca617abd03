//! Identifier resolution for generated code.
//!
//! Every name that ends up in emitted Rust goes through this module so that
//! the same design always produces the same identifiers.

use crate::design::{Attribute, FIELD_NAME_KEY};

/// Words rendered fully upper-case when they are not the leading word.
const ACRONYMS: &[&str] = &[
    "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID", "IP", "JMES",
    "JSON", "JWT", "LHS", "OK", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP",
    "TLS", "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XSRF", "XSS",
];

/// Rust keywords plus the prelude and std names generated code relies on.
const RESERVED: &[&str] = &[
    // keywords
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen", "macro",
    "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
    // built-in types
    "bool", "char", "str", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64",
    // names used by generated code
    "String", "Vec", "Option", "Result", "Box", "HashMap", "Some", "None", "Ok", "Err", "Default",
    "Format", "ValidationError", "ValidationErrors",
];

fn is_valid(c: char) -> bool {
    c.is_alphanumeric()
}

/// Split `raw` into words on invalid characters, underscores and
/// lower-to-non-lower transitions.
fn split_words(raw: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    for c in raw.chars() {
        if !is_valid(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        if let Some(p) = prev {
            if p.is_lowercase() && !c.is_lowercase() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
        prev = Some(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn decapitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn is_acronym(word: &str) -> bool {
    let upper = word.to_uppercase();
    ACRONYMS.contains(&upper.as_str())
}

pub(crate) fn escape(mut ident: String) -> String {
    if ident.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RESERVED.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Convert `raw` into a camel-case identifier.
///
/// The leading word is capitalized when `capitalize_first` is set; following
/// words always are. Known acronyms (`ID`, `HTTP`, ...) are kept upper-case,
/// except as a leading word with `capitalize_first` unset, where they are
/// lower-cased. Reserved words get a trailing `_`.
///
/// ```rust
/// use attrgen::generator::naming::resolve;
///
/// assert_eq!(resolve("test-B", true), "TestB");
/// assert_eq!(resolve("user_id", true), "UserID");
/// assert_eq!(resolve("id_token", false), "idToken");
/// ```
#[must_use]
pub fn resolve(raw: &str, capitalize_first: bool) -> String {
    escape(camel(raw, capitalize_first))
}

/// Camel-case words of `raw` without reserved-word escaping. Names built from
/// several fragments join these and escape the result once.
pub(crate) fn camel(raw: &str, capitalize_first: bool) -> String {
    let mut ident = String::new();
    for (i, word) in split_words(raw).iter().enumerate() {
        let leading = i == 0;
        if is_acronym(word) {
            if leading && !capitalize_first {
                ident.push_str(&word.to_lowercase());
            } else {
                ident.push_str(&word.to_uppercase());
            }
        } else if !leading || capitalize_first {
            ident.push_str(&capitalize(word));
        } else {
            ident.push_str(&decapitalize(word));
        }
    }
    ident
}

/// Convert `raw` into a snake_case identifier using the same word splitting
/// as [`resolve`].
#[must_use]
pub fn snake_case(raw: &str) -> String {
    escape(snake_words(raw))
}

/// Lower-cased words of `raw` joined with `_`, without escaping.
pub(crate) fn snake_words(raw: &str) -> String {
    split_words(raw)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Struct field identifier for a field, honouring the name override metadata.
#[must_use]
pub fn field_ident(name: &str, attribute: &Attribute) -> String {
    let source = attribute
        .metadata(FIELD_NAME_KEY)
        .and_then(|values| values.first())
        .map_or(name, String::as_str);
    snake_case(source)
}
