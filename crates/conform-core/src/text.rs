//! Simple casing helpers used by the built-in string transforms.

/// Uppercase the first character of every space-separated word and
/// lowercase the rest.
pub fn capitalize(input: &str) -> String {
    input
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn to_upper(input: &str) -> String {
    input.to_uppercase()
}

pub fn to_lower(input: &str) -> String {
    input.to_lowercase()
}
