//! Commit labels: the emoji + type pair placed at the front of each message.

use std::fmt;

use serde::Serialize;

/// Conventional commit label assigned to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitLabel {
    Docs,
    Chore,
    Ci,
    Style,
    Test,
    Feat,
}

impl CommitLabel {
    /// Fixed emoji glyph for this label.
    pub fn emoji(self) -> &'static str {
        match self {
            CommitLabel::Docs => "📝",
            CommitLabel::Chore => "🔧",
            CommitLabel::Ci => "👷",
            CommitLabel::Style => "🎨",
            CommitLabel::Test => "✅",
            CommitLabel::Feat => "🚀",
        }
    }

    /// Lowercase conventional commit type.
    pub fn as_str(self) -> &'static str {
        match self {
            CommitLabel::Docs => "docs",
            CommitLabel::Chore => "chore",
            CommitLabel::Ci => "ci",
            CommitLabel::Style => "style",
            CommitLabel::Test => "test",
            CommitLabel::Feat => "feat",
        }
    }
}

impl fmt::Display for CommitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.as_str())
    }
}
