//! Module compilation rules.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use crate::util::merge::merge;

/// A loader invocation within a rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UseEntry {
    pub name: String,
    pub loader: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl UseEntry {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        UseEntry {
            loader: format!("{}-loader", name),
            name,
            options: Value::Null,
        }
    }

    /// Set the loader module.
    pub fn loader(&mut self, loader: impl Into<String>) -> &mut Self {
        self.loader = loader.into();
        self
    }

    /// Replace the options.
    pub fn options(&mut self, options: Value) -> &mut Self {
        self.options = options;
        self
    }

    /// Transform the options.
    pub fn tap<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(Value) -> Value,
    {
        let options = std::mem::take(&mut self.options);
        self.options = f(options);
        self
    }

    /// Merge an option bag over the current options.
    pub fn merge_options(&mut self, over: &Value) -> &mut Self {
        self.options = merge(&self.options, over);
        self
    }
}

/// A named rule with its ordered loader chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rule {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<PathBuf>,
    #[serde(rename = "use")]
    pub uses: Vec<UseEntry>,
}

impl Rule {
    pub fn new(name: impl Into<String>) -> Self {
        Rule {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the file pattern (a regular expression source string).
    pub fn test(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.test = Some(pattern.into());
        self
    }

    pub fn enforce(&mut self, phase: impl Into<String>) -> &mut Self {
        self.enforce = Some(phase.into());
        self
    }

    pub fn include(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        let path = path.into();
        if !self.include.contains(&path) {
            self.include.push(path);
        }
        self
    }

    pub fn exclude(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        let path = path.into();
        if !self.exclude.contains(&path) {
            self.exclude.push(path);
        }
        self
    }

    /// Get or create a use entry, appended at the end when new.
    pub fn use_entry(&mut self, name: &str) -> &mut UseEntry {
        let idx = match self.position(name) {
            Some(idx) => idx,
            None => {
                self.uses.push(UseEntry::new(name));
                self.uses.len() - 1
            }
        };
        &mut self.uses[idx]
    }

    /// Get or create a use entry positioned immediately before `before`.
    ///
    /// If `before` is not in the chain the entry stays where it is (or is
    /// appended when new).
    pub fn use_before(&mut self, name: &str, before: &str) -> &mut UseEntry {
        if name == before || self.position(before).is_none() {
            return self.use_entry(name);
        }
        let entry = match self.position(name) {
            Some(idx) => self.uses.remove(idx),
            None => UseEntry::new(name),
        };
        let idx = self.position(before).unwrap_or(self.uses.len());
        self.uses.insert(idx, entry);
        &mut self.uses[idx]
    }

    pub fn get_use(&self, name: &str) -> Option<&UseEntry> {
        self.uses.iter().find(|u| u.name == name)
    }

    pub fn get_use_mut(&mut self, name: &str) -> Option<&mut UseEntry> {
        self.uses.iter_mut().find(|u| u.name == name)
    }

    pub fn use_names(&self) -> Vec<&str> {
        self.uses.iter().map(|u| u.name.as_str()).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.uses.iter().position(|u| u.name == name)
    }
}

/// Ordered collection of rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ModuleRules {
    rules: Vec<Rule>,
}

impl ModuleRules {
    /// Get or create the named rule.
    pub fn rule(&mut self, name: &str) -> &mut Rule {
        let idx = match self.rules.iter().position(|r| r.name == name) {
            Some(idx) => idx,
            None => {
                self.rules.push(Rule::new(name));
                self.rules.len() - 1
            }
        };
        &mut self.rules[idx]
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Rule> {
        self.rules.iter_mut().find(|r| r.name == name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn delete(&mut self, name: &str) -> &mut Self {
        self.rules.retain(|r| r.name != name);
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }
}
