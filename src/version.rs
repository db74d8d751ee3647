//! Build stamp: crate version plus the git state it was built from.

use std::fmt;

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where a binary came from.
///
/// Git fields read `"unknown"` when the build had no repository to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub branch: &'static str,
    pub commit: &'static str,
    pub dirty: bool,
}

impl BuildInfo {
    /// The stamp of this build.
    pub fn current() -> Self {
        Self {
            version: PKG_VERSION,
            branch: option_env!("VERGEN_GIT_BRANCH").unwrap_or("unknown"),
            commit: option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
            dirty: option_env!("VERGEN_GIT_DIRTY") == Some("true"),
        }
    }

    /// Abbreviated commit hash.
    pub fn short_commit(&self) -> &'static str {
        self.commit.get(..7).unwrap_or(self.commit)
    }
}

/// `0.4.0+main.abc1234`, with `.dirty` appended for a modified tree.
impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}.{}", self.version, self.branch, self.short_commit())?;
        if self.dirty {
            f.write_str(".dirty")?;
        }
        Ok(())
    }
}

/// [`BuildInfo::current`] rendered for logs.
pub fn version_string() -> String {
    BuildInfo::current().to_string()
}
