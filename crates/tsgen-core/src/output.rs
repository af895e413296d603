use serde::Deserialize;

/// File written when no path prefixes are configured.
pub const DEFAULT_FILE_NAME: &str = "types.ts";

/// Suffix appended to flat per-prefix file names.
pub const FLAT_FILE_SUFFIX: &str = "_types.ts";

/// File name used inside each directory of the nested layout.
pub const NESTED_FILE_NAME: &str = "type.ts";

/// How per-prefix output files are laid out under the output directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputLayout {
    /// One file per prefix directly in the output directory (`a_b_types.ts`).
    #[default]
    Flat,
    /// One directory per prefix segment (`a/b/type.ts`).
    Nested,
}

impl OutputLayout {
    /// Relative output path for a prefix, or the default file without one.
    pub fn file_path(self, prefix: Option<&str>) -> String {
        match (self, prefix) {
            (_, None) => DEFAULT_FILE_NAME.to_string(),
            (OutputLayout::Flat, Some(prefix)) => flat_file_name(prefix),
            (OutputLayout::Nested, Some(prefix)) => nested_file_path(prefix),
        }
    }
}

/// Flat file name for a path prefix: the leading `/` is dropped and every run
/// of `/` or `-` becomes a single `_`.
///
/// - `/api/users` → `api_users_types.ts`
/// - `/admin-api/channel-backend` → `admin_api_channel_backend_types.ts`
pub fn flat_file_name(prefix: &str) -> String {
    let trimmed = prefix.strip_prefix('/').unwrap_or(prefix);
    let mut name = String::with_capacity(trimmed.len() + FLAT_FILE_SUFFIX.len());
    let mut in_separator = false;
    for ch in trimmed.chars() {
        if ch == '/' || ch == '-' {
            if !in_separator {
                name.push('_');
            }
            in_separator = true;
        } else {
            name.push(ch);
            in_separator = false;
        }
    }
    name.push_str(FLAT_FILE_SUFFIX);
    name
}

/// Nested file path for a path prefix: one directory per `/` segment.
///
/// - `/api/users` → `api/users/type.ts`
pub fn nested_file_path(prefix: &str) -> String {
    let mut parts: Vec<&str> = prefix.split('/').filter(|s| !s.is_empty()).collect();
    parts.push(NESTED_FILE_NAME);
    parts.join("/")
}
