//! Lexical path helpers for generated import strings.
//!
//! Every function here works on strings and always emits `/` separators, so
//! generated code is identical no matter which platform produced it. Nothing
//! touches the file system.

/// Convert Windows separators to `/`.
pub fn win_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Whether a path is absolute: `/x` or a drive path such as `C:/x`.
pub fn is_absolute(path: &str) -> bool {
    !split_root(&win_path(path)).0.is_empty()
}

/// Collapse `.` and `..` segments and repeated separators.
///
/// Leading `..` segments of a relative path are kept; `..` at the root of an
/// absolute path is dropped. An empty relative result becomes `.`.
pub fn normalize(path: &str) -> String {
    let path = win_path(path);
    let (root, rest) = split_root(&path);

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if root.is_empty() {
                    segments.push("..");
                }
            }
            s => segments.push(s),
        }
    }

    let joined = segments.join("/");
    if root.is_empty() && joined.is_empty() {
        ".".to_string()
    } else {
        format!("{root}{joined}")
    }
}

/// Concatenate `path` onto `base` and normalize.
///
/// Like Node's `path.join`, an absolute `path` is still appended to `base`.
pub fn join(base: &str, path: &str) -> String {
    if base.is_empty() {
        return normalize(path);
    }
    normalize(&format!("{base}/{path}"))
}

/// Anchor `path` on `base` unless it is already absolute.
pub fn resolve(base: &str, path: &str) -> String {
    if is_absolute(path) {
        normalize(path)
    } else {
        join(base, path)
    }
}

/// Compute the path that leads from directory `from` to `to`.
///
/// Both inputs are normalized first. Equal paths yield an empty string. When
/// the two paths have different roots there is no relative route and `to` is
/// returned normalized.
pub fn relative(from: &str, to: &str) -> String {
    let from = normalize(from);
    let to = normalize(to);
    if from == to {
        return String::new();
    }

    let (from_root, from_rest) = split_root(&from);
    let (to_root, to_rest) = split_root(&to);
    if from_root != to_root {
        return to;
    }

    let from_segments = segments(from_rest);
    let to_segments = segments(to_rest);
    let common = from_segments
        .iter()
        .zip(&to_segments)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from_segments.len() - common];
    parts.extend(&to_segments[common..]);
    parts.join("/")
}

/// Return the part of `path` below `base`, if `path` lies inside it.
pub fn strip_base<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    if base == "." {
        return (!path.starts_with("..")).then_some(path);
    }
    let rest = path.strip_prefix(base.trim_end_matches('/'))?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix('/')
    }
}

/// Split a normalized path into its root (`/`, `C:/` or empty) and the rest.
fn split_root(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    if bytes.first() == Some(&b'/') {
        return path.split_at(1);
    }
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
    {
        return path.split_at(3);
    }
    ("", path)
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_path_converts_backslashes() {
        assert_eq!(win_path(r"routes\A"), "routes/A");
        assert_eq!(win_path(r"C:\proj\src"), "C:/proj/src");
        assert_eq!(win_path("already/posix"), "already/posix");
    }

    #[test]
    fn detects_absolute_paths() {
        assert!(is_absolute("/proj"));
        assert!(is_absolute(r"C:\proj"));
        assert!(is_absolute("d:/proj"));
        assert!(!is_absolute("./pages"));
        assert!(!is_absolute("$CWD$"));
    }

    #[test]
    fn normalize_collapses_segments() {
        assert_eq!(normalize("./pages/A"), "pages/A");
        assert_eq!(normalize("a//b/./c/../d"), "a/b/d");
        assert_eq!(normalize("../x/../../y"), "../../y");
        assert_eq!(normalize("/../etc"), "/etc");
        assert_eq!(normalize("./"), ".");
        assert_eq!(normalize(r"C:\proj\.\src\"), "C:/proj/src");
    }

    #[test]
    fn join_appends_even_absolute_paths() {
        assert_eq!(join("$CWD$", "./routes/A"), "$CWD$/routes/A");
        assert_eq!(join("$SRC$", r"AAA\LoadingComponent"), "$SRC$/AAA/LoadingComponent");
        assert_eq!(join("/proj", "/abs"), "/proj/abs");
        assert_eq!(join("", "./a"), "a");
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        assert_eq!(resolve("/proj", "/other/a"), "/other/a");
        assert_eq!(resolve("/proj", "src/a"), "/proj/src/a");
    }

    #[test]
    fn relative_walks_up_and_down() {
        assert_eq!(relative("$CWD$/pages/.umi", "$CWD$/pages/A"), "../A");
        assert_eq!(relative("$CWD$/pages/.umi", "$CWD$/A"), "../../A");
        assert_eq!(relative("/proj/src/.umi", "/proj/src/.umi/x"), "x");
        assert_eq!(relative("/a/b", "/a/b"), "");
        assert_eq!(relative("C:/a", "D:/b"), "D:/b");
    }

    #[test]
    fn strip_base_requires_a_segment_boundary() {
        assert_eq!(strip_base("/proj/src/pages/A", "/proj/src"), Some("pages/A"));
        assert_eq!(strip_base("/proj/srcfoo/A", "/proj/src"), None);
        assert_eq!(strip_base("/proj/src", "/proj/src"), Some(""));
        assert_eq!(strip_base("pages/A", "."), Some("pages/A"));
        assert_eq!(strip_base("../A", "."), None);
    }
}
