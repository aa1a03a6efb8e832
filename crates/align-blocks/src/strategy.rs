//! Text sync strategies.

use crate::error::{Error, Result};
use crate::markers::{find_managed_region, wrap_managed};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How new content replaces or merges with existing target content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncStrategy {
    /// Replace the target wholesale.
    Overwrite,
    /// Rewrite only the managed region, keeping everything around it.
    #[default]
    SmartUpdate,
}

impl SyncStrategy {
    /// The wire tag for this strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::SmartUpdate => "smart-update",
        }
    }

    /// Compute the final text for a target.
    pub fn apply(&self, current: &str, new_content: &str) -> String {
        match self {
            Self::Overwrite => new_content.to_string(),
            Self::SmartUpdate => smart_update(current, new_content),
        }
    }
}

impl fmt::Display for SyncStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "overwrite" => Ok(Self::Overwrite),
            "smart-update" => Ok(Self::SmartUpdate),
            other => Err(Error::UnknownStrategy {
                tag: other.to_string(),
            }),
        }
    }
}

/// Apply the strategy named by `tag` to `current` and `new_content`.
///
/// # Errors
///
/// Returns [`Error::UnknownStrategy`] for any tag other than `overwrite` or
/// `smart-update`. There is no fallback strategy.
///
/// # Example
/// ```
/// use align_blocks::apply_sync_strategy;
///
/// let result = apply_sync_strategy("", "NEW", "smart-update").unwrap();
/// assert_eq!(result, "<!-- align-agents-start -->\nNEW\n<!-- align-agents-end -->");
/// assert!(apply_sync_strategy("a", "b", "bogus").is_err());
/// ```
pub fn apply_sync_strategy(current: &str, new_content: &str, tag: &str) -> Result<String> {
    let strategy: SyncStrategy = tag.parse()?;
    Ok(strategy.apply(current, new_content))
}

fn smart_update(current: &str, new_content: &str) -> String {
    match find_managed_region(current) {
        Some(region) => format!(
            "{}{}{}",
            region.before(current),
            wrap_managed(new_content),
            region.after(current)
        ),
        None if current.is_empty() => wrap_managed(new_content),
        None => {
            tracing::debug!("No managed region found, appending one");
            let separator = if current.ends_with('\n') { "" } else { "\n" };
            format!("{}{}{}", current, separator, wrap_managed(new_content))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_tags() {
        assert_eq!("overwrite".parse::<SyncStrategy>().unwrap(), SyncStrategy::Overwrite);
        assert_eq!(
            "smart-update".parse::<SyncStrategy>().unwrap(),
            SyncStrategy::SmartUpdate
        );
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("Overwrite".parse::<SyncStrategy>().is_err());
    }

    #[test]
    fn display_matches_tag() {
        assert_eq!(SyncStrategy::SmartUpdate.to_string(), "smart-update");
        assert_eq!(SyncStrategy::Overwrite.to_string(), "overwrite");
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&SyncStrategy::SmartUpdate).unwrap();
        assert_eq!(json, "\"smart-update\"");
    }

    #[test]
    fn trailing_newline_is_not_doubled() {
        let result = SyncStrategy::SmartUpdate.apply("existing\n", "NEW");
        assert_eq!(
            result,
            "existing\n<!-- align-agents-start -->\nNEW\n<!-- align-agents-end -->"
        );
    }
}
