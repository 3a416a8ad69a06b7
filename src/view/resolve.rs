//! View name resolution
//!
//! Logical view names use `@`, `#` or `.` as separators: `users.show`,
//! `home#index` and `admin@users.list` all map onto directory paths.

use std::path::{Component, Path, PathBuf};

/// Extension of the markup fallback
pub const MARKUP_EXTENSION: &str = "html";

/// Replace the logical separators of a view name with `/`
///
/// # Examples
/// ```
/// use responder::view::resolve::logical_path;
/// assert_eq!(logical_path("users.show"), "users/show");
/// assert_eq!(logical_path("admin@users#list"), "admin/users/list");
/// ```
pub fn logical_path(name: &str) -> String {
    name.replace(['@', '#', '.'], "/")
}

/// Files tried for a view, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCandidates {
    /// `<base>/<path>.<script_ext>`, only when a base path is configured
    pub primary: Option<PathBuf>,
    /// `<base>/<path>.html`, or the bare logical path without a base
    pub fallback: PathBuf,
}

impl ViewCandidates {
    /// With a base path, roots and prefixes in the name are dropped so the
    /// candidates always stay under the base.
    pub fn new(base: Option<&Path>, name: &str, script_extension: &str) -> Self {
        let relative = logical_path(name);
        match base {
            Some(base) => {
                let relative = normal_components(&relative);
                Self {
                    primary: Some(base.join(format!("{relative}.{script_extension}"))),
                    fallback: base.join(format!("{relative}.{MARKUP_EXTENSION}")),
                }
            }
            None => Self {
                primary: None,
                fallback: PathBuf::from(relative),
            },
        }
    }

    /// Pick the first candidate that exists
    ///
    /// Returns `Err` with the fallback path when neither is a file.
    pub fn resolve_blocking(&self) -> Result<PathBuf, PathBuf> {
        self.choose(|p| p.is_file())
    }

    /// Async variant of [`Self::resolve_blocking`] using tokio fs
    pub async fn resolve(&self) -> Result<PathBuf, PathBuf> {
        if let Some(primary) = &self.primary {
            if is_file(primary).await {
                return Ok(primary.clone());
            }
        }
        if is_file(&self.fallback).await {
            Ok(self.fallback.clone())
        } else {
            Err(self.fallback.clone())
        }
    }

    fn choose(&self, exists: impl Fn(&Path) -> bool) -> Result<PathBuf, PathBuf> {
        match &self.primary {
            Some(primary) if exists(primary) => Ok(primary.clone()),
            _ if exists(&self.fallback) => Ok(self.fallback.clone()),
            _ => Err(self.fallback.clone()),
        }
    }
}

fn normal_components(relative: &str) -> String {
    Path::new(relative)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_path() {
        assert_eq!(logical_path("home#index"), "home/index");
        assert_eq!(logical_path("plain"), "plain");
        assert_eq!(logical_path("a.b@c#d"), "a/b/c/d");
    }

    #[test]
    fn test_candidates_with_base() {
        let c = ViewCandidates::new(Some(Path::new("/views")), "users.show", "tpl");
        assert_eq!(c.primary, Some(PathBuf::from("/views/users/show.tpl")));
        assert_eq!(c.fallback, PathBuf::from("/views/users/show.html"));
    }

    #[test]
    fn test_candidates_stay_under_base() {
        let c = ViewCandidates::new(Some(Path::new("/views")), "/etc/passwd", "tpl");
        assert_eq!(c.primary, Some(PathBuf::from("/views/etc/passwd.tpl")));
        assert_eq!(c.fallback, PathBuf::from("/views/etc/passwd.html"));

        let c = ViewCandidates::new(Some(Path::new("/views")), "//a///b", "tpl");
        assert_eq!(c.fallback, PathBuf::from("/views/a/b.html"));
    }

    #[test]
    fn test_candidates_without_base() {
        let c = ViewCandidates::new(None, "users.show", "tpl");
        assert_eq!(c.primary, None);
        assert_eq!(c.fallback, PathBuf::from("users/show"));
    }

    #[test]
    fn test_choose_order() {
        let c = ViewCandidates::new(Some(Path::new("/v")), "a", "tpl");
        assert_eq!(c.choose(|_| true), Ok(PathBuf::from("/v/a.tpl")));
        assert_eq!(
            c.choose(|p| p.extension().is_some_and(|e| e == "html")),
            Ok(PathBuf::from("/v/a.html"))
        );
        assert_eq!(c.choose(|_| false), Err(PathBuf::from("/v/a.html")));
    }
}
