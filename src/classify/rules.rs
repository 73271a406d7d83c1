//! Ordered classification rules.
//!
//! Rules are evaluated top to bottom and the first match wins. A path that
//! matches nothing falls through to [`DEFAULT_LABEL`], so [`classify`] is
//! total over every string, including empty and extension-less paths.

use std::path::Path;

use super::label::CommitLabel;

/// Label used when no rule matches.
pub const DEFAULT_LABEL: CommitLabel = CommitLabel::Chore;

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx", "markdown"];
const CONFIG_MARKERS: &[&str] = &[
    "config",
    "package.json",
    "lock",
    "gitignore",
    "env",
    "docker",
    "ecosystem",
];
const CI_MARKERS: &[&str] = &[".github", "scripts"];
const STYLESHEET_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less", "styl"];
const TEST_MARKERS: &[&str] = &["test", "spec", "verify"];
const SOURCE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "vue", "html", "htm", "php",
];
const ASSET_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "ico", "json"];

/// The parts of a path the rules look at.
#[derive(Debug)]
pub struct PathFacts<'a> {
    /// The path exactly as reported by git.
    pub raw: &'a str,
    /// Lowercased final path component.
    pub basename: String,
    /// Lowercased extension of the basename, without the dot.
    pub extension: Option<String>,
}

impl<'a> PathFacts<'a> {
    pub fn new(path: &'a str) -> Self {
        let basename = path.rsplit('/').next().unwrap_or(path);

        Self {
            raw: path,
            basename: basename.to_lowercase(),
            extension: Path::new(basename)
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase()),
        }
    }

    fn basename_contains_any(&self, markers: &[&str]) -> bool {
        markers.iter().any(|m| self.basename.contains(m))
    }

    fn extension_in(&self, set: &[&str]) -> bool {
        self.extension
            .as_deref()
            .is_some_and(|ext| set.contains(&ext))
    }
}

/// One row of the classification table.
pub struct Rule {
    pub name: &'static str,
    pub label: CommitLabel,
    pub matches: fn(&PathFacts<'_>) -> bool,
}

fn is_documentation(f: &PathFacts<'_>) -> bool {
    f.basename.contains("readme")
        || f.basename.contains("license")
        || f.extension_in(MARKDOWN_EXTENSIONS)
}

fn is_configuration(f: &PathFacts<'_>) -> bool {
    f.basename_contains_any(CONFIG_MARKERS)
}

// Substring match on the whole path, so `deploy-scripts.sh` counts too.
fn is_ci(f: &PathFacts<'_>) -> bool {
    CI_MARKERS.iter().any(|m| f.raw.contains(m))
}

fn is_stylesheet(f: &PathFacts<'_>) -> bool {
    f.extension_in(STYLESHEET_EXTENSIONS)
}

fn is_test(f: &PathFacts<'_>) -> bool {
    f.basename_contains_any(TEST_MARKERS)
}

fn is_source(f: &PathFacts<'_>) -> bool {
    f.extension_in(SOURCE_EXTENSIONS)
}

fn is_static_asset(f: &PathFacts<'_>) -> bool {
    f.extension_in(ASSET_EXTENSIONS)
}

/// Classification table in priority order.
pub static RULES: &[Rule] = &[
    Rule {
        name: "documentation",
        label: CommitLabel::Docs,
        matches: is_documentation,
    },
    Rule {
        name: "configuration",
        label: CommitLabel::Chore,
        matches: is_configuration,
    },
    Rule {
        name: "ci",
        label: CommitLabel::Ci,
        matches: is_ci,
    },
    Rule {
        name: "stylesheet",
        label: CommitLabel::Style,
        matches: is_stylesheet,
    },
    Rule {
        name: "test",
        label: CommitLabel::Test,
        matches: is_test,
    },
    Rule {
        name: "source",
        label: CommitLabel::Feat,
        matches: is_source,
    },
    // Assets share the style label.
    Rule {
        name: "static-asset",
        label: CommitLabel::Style,
        matches: is_static_asset,
    },
];

/// Map a path to its commit label.
pub fn classify(path: &str) -> CommitLabel {
    explain(path).1
}

/// Like [`classify`], but also returns the name of the rule that matched
/// (`"default"` when none did).
pub fn explain(path: &str) -> (&'static str, CommitLabel) {
    let facts = PathFacts::new(path);
    RULES
        .iter()
        .find(|rule| (rule.matches)(&facts))
        .map_or(("default", DEFAULT_LABEL), |rule| (rule.name, rule.label))
}

/// Build the commit message for a path: `<emoji> <type>: add <basename>`.
///
/// The basename keeps its original case.
pub fn commit_message(path: &str) -> String {
    commit_message_for(classify(path), path)
}

/// Same template as [`commit_message`], for a label already computed.
pub fn commit_message_for(label: CommitLabel, path: &str) -> String {
    let basename = path.rsplit('/').next().unwrap_or(path);
    format!("{}: add {}", label, basename)
}
