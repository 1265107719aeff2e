//! Identifier normalization.
//!
//! Document names are free text ("Get User (v2)!"). Requests are addressed by
//! a snake-case identifier and folders by a title-case one.

/// Characters treated as word separators before normalizing.
const SEPARATORS: &[char] = &[
    '?', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '-', '+', '=', ',', '.', '/',
    '\'', '\\', '"', '|', ':', ';', '{', '}', '[', ']',
];

fn replace_separators(name: &str) -> String {
    name.chars()
        .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
        .collect()
}

/// Normalizes a request name to a snake-case identifier.
///
/// ```
/// use collection_runner::parser::names::normalize_func_name;
///
/// assert_eq!(normalize_func_name("API-V2 Test!"), "api_v2_test");
/// ```
pub fn normalize_func_name(name: &str) -> String {
    replace_separators(name)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Normalizes a folder name to a title-joined identifier.
///
/// ```
/// use collection_runner::parser::names::normalize_class_name;
///
/// assert_eq!(normalize_class_name("my folder-1"), "MyFolder1");
/// ```
pub fn normalize_class_name(name: &str) -> String {
    title_case(&replace_separators(name))
        .split_whitespace()
        .collect()
}

/// Upper-cases the first letter of every run of letters and lower-cases the
/// rest. Any non-letter starts a new run.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_was_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_was_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_was_letter = true;
        } else {
            out.push(c);
            previous_was_letter = false;
        }
    }

    out
}
