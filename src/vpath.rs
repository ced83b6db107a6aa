//! Lexical virtual-path resolution.
//!
//! The shell tracks a POSIX-style working directory for the remote side
//! without ever consulting a real filesystem. Resolution is purely textual:
//! `.` and empty segments disappear, `..` pops one segment and never climbs
//! above the root.

/// Resolve `arg` against `current`, returning a normalized absolute path.
///
/// `current` is assumed absolute; relative `arg` values are joined onto it.
pub fn resolve(current: &str, arg: &str) -> String {
    if arg.starts_with('/') {
        normalize(arg)
    } else {
        normalize(&format!("{current}/{arg}"))
    }
}

/// Normalize a POSIX-style path into absolute form with no `.`/`..`/empty
/// segments. Input that is not absolute is treated as rooted at `/`.
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// True when `path` is normalized absolute form as produced by [`normalize`].
pub fn is_normalized(path: &str) -> bool {
    if path == "/" {
        return true;
    }
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };
    !rest.ends_with('/')
        && rest
            .split('/')
            .all(|seg| !seg.is_empty() && seg != "." && seg != "..")
}
