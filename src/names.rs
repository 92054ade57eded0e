//! Name transforms between folder names, tag names and class names.
//!
//! Component folders are camelCase (`myButton`), tags are dash-case
//! (`demo-my-button`) and class names are capitalized segments
//! (`XDemoMyButtonBasic`).

/// `myButton` → `my-button`.
///
/// A dash goes between a letter and the uppercase letter that follows it;
/// the result is lowercased. Digits never start a new segment.
pub fn dash_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;
    for c in input.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_alphabetic()) {
            out.push('-');
        }
        out.extend(c.to_lowercase());
        prev = Some(c);
    }
    out
}

/// `my-button` → `myButton`.
///
/// Only a dash followed by a lowercase ASCII letter is folded; any other
/// dash is kept as written.
pub fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_lowercase() {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// `button` → `Button`. Empty input stays empty.
pub fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
