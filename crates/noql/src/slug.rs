/// Lowercases `tag` and collapses every run of characters outside
/// `a-z`/`0-9` into a single `-`.
///
/// Runs at either end are kept as hyphens, not trimmed, so a tag made
/// entirely of separators collapses to `"-"`.
pub fn slugify(tag: &str) -> String {
    let mut slug = String::with_capacity(tag.len());
    let mut pending_separator = false;
    for ch in tag.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator {
                slug.push('-');
                pending_separator = false;
            }
            slug.push(ch);
        } else {
            pending_separator = true;
        }
    }
    if pending_separator {
        slug.push('-');
    }
    slug
}
