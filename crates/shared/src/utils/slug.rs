/// Lowercase ASCII slug: alphanumerics kept, runs of anything else collapsed to `-`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c == '_' || c == '-' || c.is_whitespace() || c.is_ascii_punctuation() {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn collapses_separators_and_lowercases() {
        assert_eq!(slugify("  Linen Shirt -- XL "), "linen-shirt-xl");
        assert_eq!(slugify("Café & Co."), "caf-co");
        assert_eq!(slugify("!!!"), "");
    }
}
