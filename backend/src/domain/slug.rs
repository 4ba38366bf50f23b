//! Shared slug validation predicates for domain entities.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens.

/// Return `true` when `value` is a valid page slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty() && value.trim() == value && has_allowed_slug_chars(value)
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Derive a slug candidate from free text, e.g. a page title.
///
/// Runs of characters outside the slug alphabet collapse into one hyphen and
/// leading or trailing hyphens are dropped. The result may be empty.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    //! Slug predicate and derivation coverage.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Hello, World!", "hello-world")]
    #[case("  Pricing  ", "pricing")]
    #[case("Step 2 -- Build", "step-2-build")]
    #[case("***", "")]
    fn slugify_produces_valid_slugs(#[case] input: &str, #[case] expected: &str) {
        let slug = slugify(input);
        assert_eq!(slug, expected);
        assert_eq!(is_valid_slug(&slug), !expected.is_empty());
    }
}
