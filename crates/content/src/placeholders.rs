//! Placeholder discovery for authoring surfaces.
//!
//! Templates reference variables as `{{ name }}`. Authoring UIs list the
//! names a template uses so editors can see which fields the sending
//! service will fill in. Discovery never rewrites the template.

/// Collect the distinct placeholder names referenced by a template, in
/// first-appearance order. Inner whitespace is trimmed; an empty or
/// unterminated `{{` token is skipped.
pub fn placeholder_names(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = content;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        let name = after[..end].trim();
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
        rest = &after[end + 2..];
    }
    names
}
