/// Convert a title into a URL-friendly slug.
///
/// Lowercases, drops everything except ASCII word characters, whitespace
/// and `-`, then collapses each run of whitespace, `_` and `-` into a single
/// `-`. Leading and trailing dashes are removed.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.to_lowercase().chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_dash = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        }
    }

    slug
}
