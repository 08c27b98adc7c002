//! Identifier sanitization over the ECMAScript identifier character classes.

mod tables;

use heck::ToPascalCase;

/// True when `ch` may begin an identifier.
pub fn is_identifier_start(ch: char) -> bool {
    match ch {
        'a'..='z' | 'A'..='Z' | '$' | '_' => true,
        ch if (ch as u32) < 0x80 => false,
        ch => in_table(tables::IDENTIFIER_START, ch as u32),
    }
}

/// True when `ch` may continue an identifier.
pub fn is_identifier_part(ch: char) -> bool {
    if ch.is_ascii_digit() || is_identifier_start(ch) {
        return true;
    }
    if (ch as u32) < 0x80 {
        return false;
    }
    in_table(tables::IDENTIFIER_PART, ch as u32)
}

fn in_table(ranges: &[(u32, u32)], code_point: u32) -> bool {
    let idx = ranges.partition_point(|&(_, end)| end < code_point);
    idx < ranges.len() && ranges[idx].0 <= code_point
}

/// Strip `text` down to a valid identifier.
///
/// Concatenates every maximal identifier run found in the input, in order;
/// characters outside a run are dropped without replacement. A run starts at
/// an identifier-start code point and continues over identifier-part code
/// points, so `"pet-store"` becomes `"petstore"` and a leading digit run is
/// dropped entirely. Returns an empty string when no run exists.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if in_run {
            if is_identifier_part(ch) {
                out.push(ch);
            } else {
                in_run = false;
            }
        } else if is_identifier_start(ch) {
            out.push(ch);
            in_run = true;
        }
    }
    out
}

/// Uppercase the first character, leaving the rest untouched.
pub fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derive a camelCase operation name from an HTTP method and path template,
/// for operations that carry no `operationId`.
///
/// `GET /pets` → `getPets`, `POST /pets/{petId}/photos` → `postPetsPhotos`.
pub fn route_name(method: &str, path: &str) -> String {
    let resource: String = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .filter(|segment| !(segment.starts_with('{') && segment.ends_with('}')))
        .map(|segment| sanitize(segment).to_pascal_case())
        .collect();
    format!("{}{}", method.to_lowercase(), resource)
}
