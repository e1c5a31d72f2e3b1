//! Skip/split rules for exports.
//!
//! The rule file is JSON: `{"skip": [...], "split": [...]}`. Each entry is a
//! pattern string applying to every container, or an object mapping a
//! container file name to its own pattern list. Patterns match export names
//! from the start (prefix match), like a regex `match` call.

use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use crate::types::errors::{ConvertError, ConvertResult};

/// Characters kept when a split pattern becomes a document suffix.
static RE_SUFFIX_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w_.)( -]").expect("Invalid regex"));

/// A pattern compiled once, anchored at the start of the name.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    regex: Regex,
}

impl Matcher {
    pub fn compile(pattern: &str) -> ConvertResult<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})"))
            .map_err(|e| ConvertError::MalformedRule(format!("bad pattern '{pattern}': {e}")))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Document suffix derived from the pattern text.
    pub fn suffix(&self) -> String {
        RE_SUFFIX_STRIP.replace_all(&self.pattern, "").into_owned()
    }
}

/// On-disk shape of the rule file. `null` lists count as empty.
#[derive(Debug, Deserialize)]
struct RawRules {
    #[serde(default)]
    skip: Option<Vec<RawEntry>>,
    #[serde(default)]
    split: Option<Vec<RawEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Global(String),
    PerFile(BTreeMap<String, Vec<String>>),
}

#[derive(Debug, Clone)]
enum RuleEntry {
    Global(Matcher),
    PerFile {
        file_name: String,
        patterns: Vec<Matcher>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    skip: Vec<RuleEntry>,
    split: Vec<RuleEntry>,
}

impl RuleSet {
    /// Load a rule file. A missing file means no rules; anything unreadable or
    /// malformed is an error.
    pub fn load(path: &Path) -> ConvertResult<Self> {
        if !path.exists() {
            log::warn!(
                "Rule file not found {}. Converting every export.",
                path.display()
            );
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let rules = Self::from_json(&contents)?;
        log::info!(
            "Loaded {} skip and {} split rules from {}",
            rules.skip.len(),
            rules.split.len(),
            path.display()
        );
        Ok(rules)
    }

    pub fn from_json(contents: &str) -> ConvertResult<Self> {
        let raw: RawRules = serde_json::from_str(contents)
            .map_err(|e| ConvertError::MalformedRule(format!("invalid rule file: {e}")))?;

        Ok(Self {
            skip: compile_entries(raw.skip.unwrap_or_default())?,
            split: compile_entries(raw.split.unwrap_or_default())?,
        })
    }

    /// Rules that apply to the container named `file_name`, in file order.
    pub fn for_container(&self, file_name: &str) -> ContainerRules {
        ContainerRules {
            skip: select(&self.skip, file_name),
            split: select(&self.split, file_name),
        }
    }
}

fn compile_entries(raw: Vec<RawEntry>) -> ConvertResult<Vec<RuleEntry>> {
    let mut entries = Vec::with_capacity(raw.len());
    for entry in raw {
        match entry {
            RawEntry::Global(pattern) => entries.push(RuleEntry::Global(Matcher::compile(&pattern)?)),
            RawEntry::PerFile(per_file) => {
                for (file_name, list) in per_file {
                    let patterns = list
                        .iter()
                        .map(|p| Matcher::compile(p))
                        .collect::<ConvertResult<Vec<_>>>()?;
                    entries.push(RuleEntry::PerFile {
                        file_name,
                        patterns,
                    });
                }
            }
        }
    }
    Ok(entries)
}

fn select(entries: &[RuleEntry], file_name: &str) -> Vec<Matcher> {
    let mut matchers = Vec::new();
    for entry in entries {
        match entry {
            RuleEntry::Global(m) => matchers.push(m.clone()),
            RuleEntry::PerFile {
                file_name: name,
                patterns,
            } if name == file_name => matchers.extend(patterns.iter().cloned()),
            RuleEntry::PerFile { .. } => {}
        }
    }
    matchers
}

/// Rules resolved for one container.
#[derive(Debug, Clone, Default)]
pub struct ContainerRules {
    skip: Vec<Matcher>,
    split: Vec<Matcher>,
}

impl ContainerRules {
    pub fn is_skipped(&self, export: &str) -> bool {
        self.skip.iter().any(|m| m.is_match(export))
    }

    /// A clip is skipped only when every one of its export names is.
    pub fn skips_all(&self, exports: &[String]) -> bool {
        !exports.is_empty() && exports.iter().all(|e| self.is_skipped(e))
    }

    pub fn kept_exports(&self, exports: &[String]) -> Vec<String> {
        exports
            .iter()
            .filter(|e| !self.is_skipped(e))
            .cloned()
            .collect()
    }

    /// Document key: the frame rate, plus `_{suffix}` for each split pattern
    /// matching the first export name that matches any of them.
    pub fn document_key(&self, frame_rate: u8, exports: &[String]) -> String {
        let mut key = frame_rate.to_string();
        let first = exports
            .iter()
            .find(|e| self.split.iter().any(|m| m.is_match(e)));
        if let Some(export) = first {
            for matcher in self.split.iter().filter(|m| m.is_match(export)) {
                key.push('_');
                key.push_str(&matcher.suffix());
            }
        }
        key
    }
}

#[cfg(test)]
#[path = "tests/rules_tests.rs"]
mod tests;
