/// Derive a declaration name from an operation's path and method.
///
/// Brace-delimited path parameters are dropped, the rest is split on `/` and
/// `-`, and method, segments and a `Request`/`Response` suffix are joined with
/// each first letter upper-cased.
///
/// Examples:
/// - `GET /users/{id}` → `GetUsersResponse`
/// - `POST /users` (request) → `PostUsersRequest`
/// - `GET /user-groups/{groupId}/members` → `GetUserGroupsMembersResponse`
pub fn derive_name(path: &str, method: &str, is_request: bool) -> String {
    let stripped = strip_path_params(path);
    let suffix = if is_request { "Request" } else { "Response" };

    let mut name = capitalize_first(method);
    for segment in stripped.split(['/', '-']).filter(|s| !s.is_empty()) {
        name.push_str(&capitalize_first(segment));
    }
    name.push_str(suffix);
    name
}

/// Remove every `{...}` group (without nested braces) from `path`.
fn strip_path_params(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find(['{', '}']) {
            Some(i) if after[i..].starts_with('}') => {
                result.push_str(&rest[..open]);
                rest = &after[i + 1..];
            }
            Some(i) => {
                // Another `{` before the closing brace: the outer one is literal.
                result.push_str(&rest[..open + 1 + i]);
                rest = &after[i..];
            }
            None => break,
        }
    }
    result.push_str(rest);
    result
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
