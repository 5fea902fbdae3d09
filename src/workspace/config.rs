//! Workspace configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;
use crate::hir::DEFAULT_MAX_INHERITANCE_DEPTH;

/// An import remapping, `[context:]prefix=target`.
///
/// An import path starting with `prefix` is rewritten to start with
/// `target` instead. With a `context`, the remapping only applies to
/// importers whose path starts with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remapping {
    pub context: Option<String>,
    pub prefix: String,
    pub target: String,
}

impl Remapping {
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            context: None,
            prefix: prefix.into(),
            target: target.into(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn applies_to(&self, importer: &str) -> bool {
        self.context
            .as_deref()
            .is_none_or(|context| importer.starts_with(context))
    }

    /// Rewrite `import_path` if it starts with this remapping's prefix.
    pub fn apply(&self, import_path: &str) -> Option<String> {
        let rest = import_path.strip_prefix(self.prefix.as_str())?;
        Some(format!("{}{rest}", self.target))
    }
}

impl FromStr for Remapping {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let entry = s.trim();
        let (lhs, target) = entry
            .split_once('=')
            .ok_or_else(|| AnalysisError::InvalidRemapping(entry.to_string()))?;
        let (context, prefix) = match lhs.split_once(':') {
            Some((context, prefix)) => (Some(context), prefix),
            None => (None, lhs),
        };
        if prefix.is_empty() || target.is_empty() {
            return Err(AnalysisError::InvalidRemapping(entry.to_string()));
        }
        Ok(Self {
            context: context.filter(|c| !c.is_empty()).map(str::to_string),
            prefix: prefix.to_string(),
            target: target.to_string(),
        })
    }
}

impl fmt::Display for Remapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{context}:")?;
        }
        write!(f, "{}={}", self.prefix, self.target)
    }
}

/// Parse a `remappings.txt` body: one remapping per line, blank lines and
/// `#` comments skipped.
pub fn parse_remappings(text: &str) -> Result<Vec<Remapping>, AnalysisError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::parse)
        .collect()
}

/// Settings for a [`Workspace`](super::Workspace).
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    pub remappings: Vec<Remapping>,
    /// Build trees from the parser's recovered CST instead of leaving a file
    /// with syntax errors absent.
    pub tolerate_syntax_errors: bool,
    pub max_inheritance_depth: usize,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            remappings: Vec::new(),
            tolerate_syntax_errors: false,
            max_inheritance_depth: DEFAULT_MAX_INHERITANCE_DEPTH,
        }
    }
}

impl WorkspaceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remapping(mut self, remapping: Remapping) -> Self {
        self.remappings.push(remapping);
        self
    }

    pub fn with_remappings(mut self, remappings: impl IntoIterator<Item = Remapping>) -> Self {
        self.remappings.extend(remappings);
        self
    }

    pub fn tolerate_syntax_errors(mut self, tolerate: bool) -> Self {
        self.tolerate_syntax_errors = tolerate;
        self
    }

    pub fn with_max_inheritance_depth(mut self, depth: usize) -> Self {
        self.max_inheritance_depth = depth;
        self
    }
}
