//! Normalized path handling and home-directory expansion

use std::path::{Path, PathBuf};

/// Placeholders that stand for the user's home directory in tool metadata.
const HOME_PLACEHOLDERS: &[&str] = &["{home}", "$HOME"];

/// A path normalized to use forward slashes internally.
///
/// Sync state is keyed by target file path, so two spellings of the same
/// file (`C:\x\y` and `C:/x/y`) must compare equal. All I/O converts back to
/// a native `PathBuf` at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: path.as_ref().to_string_lossy().replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append one segment, with exactly one separator in between.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let segment = segment.trim_start_matches('/');
        let inner = match self.inner.as_str() {
            "" => segment.to_string(),
            base if base.ends_with('/') => format!("{base}{segment}"),
            base => format!("{base}/{segment}"),
        };
        Self { inner }
    }

    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        let inner = match trimmed.rfind('/')? {
            0 => "/".to_string(),
            idx => trimmed[..idx].to_string(),
        };
        Some(Self { inner })
    }

    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// Extension of the file name; dotfiles like `.cursorrules` have none.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx + 1..]),
        }
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

/// Expand a leading `~` or a home placeholder (`{home}`, `$HOME`) against `home`.
///
/// Paths without a home reference are returned unchanged.
pub fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        return home.to_path_buf();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return home.join(rest);
    }
    for placeholder in HOME_PLACEHOLDERS {
        if let Some(rest) = raw.strip_prefix(placeholder) {
            let rest = rest.trim_start_matches(['/', '\\']);
            return if rest.is_empty() {
                home.to_path_buf()
            } else {
                home.join(rest)
            };
        }
    }
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_backslashes() {
        let path = NormalizedPath::new(r"C:\Users\dev\.claude\CLAUDE.md");
        assert_eq!(path.as_str(), "C:/Users/dev/.claude/CLAUDE.md");
    }

    #[test]
    fn join_and_parent() {
        let base = NormalizedPath::new("/home/dev/project");
        let joined = base.join("AGENTS.md");
        assert_eq!(joined.as_str(), "/home/dev/project/AGENTS.md");
        assert_eq!(joined.parent().unwrap(), base);
        assert_eq!(joined.file_name(), Some("AGENTS.md"));
        assert_eq!(joined.extension(), Some("md"));
    }

    #[test]
    fn dotfile_has_no_extension() {
        let path = NormalizedPath::new("/repo/.cursorrules");
        assert_eq!(path.extension(), None);
    }

    #[test]
    fn expand_tilde() {
        let home = Path::new("/home/dev");
        assert_eq!(expand_home("~/.codex/config.toml", home), home.join(".codex/config.toml"));
        assert_eq!(expand_home("~", home), home.to_path_buf());
    }

    #[test]
    fn expand_placeholders() {
        let home = Path::new("/home/dev");
        assert_eq!(expand_home("{home}/.gemini", home), home.join(".gemini"));
        assert_eq!(expand_home("$HOME/.qwen", home), home.join(".qwen"));
    }

    #[test]
    fn absolute_paths_untouched() {
        let home = Path::new("/home/dev");
        assert_eq!(expand_home("/etc/tool.json", home), PathBuf::from("/etc/tool.json"));
        assert_eq!(expand_home("rel/~/x", home), PathBuf::from("rel/~/x"));
    }
}
