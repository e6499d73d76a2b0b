//! Category path codec
//!
//! Pure conversions between the two path representations of a category:
//!
//! - **Slug path** (machine-facing): lowercase hyphenated segments joined by
//!   `/`, e.g. `clothing/hood-wears/hoodies`. Used for lookups and routing.
//! - **Display path** (human-facing): title-cased segments joined by ` > `,
//!   e.g. `Clothing > Hood Wears > Hoodies`. Used for pickers and breadcrumbs.
//!
//! # Round-trip contract
//!
//! `display_path_to_slug_path(slug_path_to_display_path(p)) == p` for any
//! slug path whose segments are non-empty lowercase alphanumeric words joined
//! by single hyphens. The conversions are lossy in exactly two ways, by
//! contract rather than by accident:
//!
//! - case is normalized (`CO OP` and `Co Op` both map to `co-op`)
//! - runs of whitespace collapse to a single hyphen
//!
//! Anything else (the segment text itself) survives a full round trip.

use regex::Regex;
use std::sync::LazyLock;

/// Separator between segments of a display path
const DISPLAY_SEPARATOR: &str = " > ";

/// Compiled regex for whitespace-run collapsing
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Convert a slug path to its display path
///
/// Splits on `/`, treats each hyphen inside a segment as a word boundary,
/// capitalizes each word, and joins segments with ` > `. Pure and total: any
/// well-formed slug path converts without error.
///
/// # Examples
///
/// ```rust
/// use catalog_core::utils::slug_path_to_display_path;
///
/// assert_eq!(
///     slug_path_to_display_path("clothing/hood-wears/hoodies"),
///     "Clothing > Hood Wears > Hoodies"
/// );
/// assert_eq!(slug_path_to_display_path("co-op"), "Co Op");
/// ```
pub fn slug_path_to_display_path(path: &str) -> String {
    path.split('/')
        .map(display_segment)
        .collect::<Vec<_>>()
        .join(DISPLAY_SEPARATOR)
}

/// Convert a display path to its slug path
///
/// Splits on ` > `, lowercases each segment, collapses runs of whitespace to
/// a single hyphen, and joins with `/`.
///
/// # Examples
///
/// ```rust
/// use catalog_core::utils::display_path_to_slug_path;
///
/// assert_eq!(
///     display_path_to_slug_path("Clothing > Hood Wears > Hoodies"),
///     "clothing/hood-wears/hoodies"
/// );
/// // Whitespace collapsing is lossy by contract
/// assert_eq!(display_path_to_slug_path("Hood   Wears"), "hood-wears");
/// ```
pub fn display_path_to_slug_path(display: &str) -> String {
    display
        .split(DISPLAY_SEPARATOR)
        .map(slugify)
        .collect::<Vec<_>>()
        .join("/")
}

/// Derive a slug from a human-readable name
///
/// The single-segment form of [`display_path_to_slug_path`]: trim, lowercase,
/// collapse whitespace runs to single hyphens. No other normalization is
/// applied; a name containing characters that are not valid in a slug (see
/// [`crate::models::is_valid_slug`]) yields an invalid slug, which callers
/// reject at validation rather than silently repairing.
///
/// # Examples
///
/// ```rust
/// use catalog_core::utils::slugify;
///
/// assert_eq!(slugify("Hood Wears"), "hood-wears");
/// assert_eq!(slugify("Co-op"), "co-op");
/// assert_eq!(slugify("CO OP"), "co-op");
/// ```
pub fn slugify(name: &str) -> String {
    WHITESPACE_RE
        .replace_all(name.trim(), "-")
        .to_lowercase()
}

/// Title-case one slug segment: hyphens become spaces, words get capitalized
fn display_segment(segment: &str) -> String {
    segment
        .split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character of a word, leaving the rest untouched
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
