//! Turning display names into file name components.

/// Removes troublesome characters so `name` can be part of a file name.
///
/// Spaces become `_`, `&` becomes `And`, and both `/` and `\` become `-`.
/// Dot segments are left alone, so distinct names stay distinct. An empty
/// name cleans to `.`.
pub fn clean_filename(name: &str) -> String {
    if name.is_empty() {
        return ".".to_string();
    }
    name.replace(' ', "_")
        .replace('&', "And")
        .replace(['/', '\\'], "-")
}
