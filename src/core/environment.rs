//! Environment snapshot and named build conditions.
//!
//! The environment is read once, at process start, into an [`Environment`]
//! value. Middlewares never look at process variables directly; every
//! condition is a pure function of this snapshot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::PresetError;

/// Variable holding the build mode.
pub const MODE_VAR: &str = "NODE_ENV";

/// Variable holding the CI flag.
pub const CI_VAR: &str = "CI";

/// Variables holding the branch name, in lookup order.
pub const BRANCH_VARS: &[&str] = &["TRAVIS_BRANCH", "BRANCH"];

/// Branch treated as the release line.
pub const MASTER_BRANCH: &str = "master";

/// Build mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    #[default]
    Production,
    Test,
}

impl FromStr for Mode {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            "test" => Ok(Mode::Test),
            other => Err(PresetError::config(
                "environment",
                format!(
                    "invalid {} value `{}` (expected development, production or test)",
                    MODE_VAR, other
                ),
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => write!(f, "development"),
            Mode::Production => write!(f, "production"),
            Mode::Test => write!(f, "test"),
        }
    }
}

/// The command the build tool was invoked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    #[default]
    Build,
    Start,
    Test,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Build => write!(f, "build"),
            Command::Start => write!(f, "start"),
            Command::Test => write!(f, "test"),
        }
    }
}

/// A named predicate over the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "isDevelopment")]
    IsDevelopment,
    #[serde(rename = "isProduction")]
    IsProduction,
    #[serde(rename = "isCI")]
    IsCi,
    #[serde(rename = "isMasterBranch")]
    IsMasterBranch,
    #[serde(rename = "isBuildCommand")]
    IsBuildCommand,
    #[serde(rename = "isStartCommand")]
    IsStartCommand,
    #[serde(rename = "isTestEnv")]
    IsTestEnv,
}

impl Condition {
    /// All known conditions.
    pub const ALL: [Condition; 7] = [
        Condition::IsDevelopment,
        Condition::IsProduction,
        Condition::IsCi,
        Condition::IsMasterBranch,
        Condition::IsBuildCommand,
        Condition::IsStartCommand,
        Condition::IsTestEnv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::IsDevelopment => "isDevelopment",
            Condition::IsProduction => "isProduction",
            Condition::IsCi => "isCI",
            Condition::IsMasterBranch => "isMasterBranch",
            Condition::IsBuildCommand => "isBuildCommand",
            Condition::IsStartCommand => "isStartCommand",
            Condition::IsTestEnv => "isTestEnv",
        }
    }
}

impl FromStr for Condition {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PresetError::UnknownCondition(s.to_string()))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the process environment taken once per composition pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Environment {
    mode: Mode,
    ci: bool,
    branch: Option<String>,
    command: Command,
}

impl Environment {
    /// Create an environment with explicit values.
    pub fn new(mode: Mode, command: Command) -> Self {
        Environment {
            mode,
            ci: false,
            branch: None,
            command,
        }
    }

    /// Read the process environment.
    ///
    /// An unset mode defaults to production; an unrecognised one is an error.
    pub fn from_env(command: Command) -> Result<Self, PresetError> {
        Self::from_lookup(command, |key| std::env::var(key).ok())
    }

    /// Build an environment from an arbitrary variable lookup.
    pub fn from_lookup<F>(command: Command, lookup: F) -> Result<Self, PresetError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup(MODE_VAR) {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => Mode::default(),
        };

        let ci = lookup(CI_VAR)
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);

        let branch = BRANCH_VARS
            .iter()
            .find_map(|key| lookup(key).filter(|v| !v.is_empty()));

        Ok(Environment {
            mode,
            ci,
            branch,
            command,
        })
    }

    /// Set the CI flag.
    pub fn with_ci(mut self, ci: bool) -> Self {
        self.ci = ci;
        self
    }

    /// Set the branch name.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Override the mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn is_ci(&self) -> bool {
        self.ci
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// Evaluate a typed condition.
    pub fn check(&self, condition: Condition) -> bool {
        match condition {
            Condition::IsDevelopment => self.mode == Mode::Development,
            Condition::IsProduction => self.mode == Mode::Production,
            Condition::IsTestEnv => self.mode == Mode::Test,
            Condition::IsCi => self.ci,
            Condition::IsMasterBranch => self.branch.as_deref() == Some(MASTER_BRANCH),
            Condition::IsBuildCommand => self.command == Command::Build,
            Condition::IsStartCommand => self.command == Command::Start,
        }
    }

    /// Evaluate a condition by name.
    pub fn evaluate(&self, name: &str) -> Result<bool, PresetError> {
        Ok(self.check(name.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let env = Environment::from_lookup(Command::Build, lookup(&[])).unwrap();
        assert_eq!(env.mode(), Mode::Production);
        assert!(!env.is_ci());
        assert_eq!(env.branch(), None);
    }

    #[test]
    fn test_from_lookup_reads_variables() {
        let env = Environment::from_lookup(
            Command::Start,
            lookup(&[
                ("NODE_ENV", "development"),
                ("CI", "true"),
                ("TRAVIS_BRANCH", "feature/x"),
            ]),
        )
        .unwrap();

        assert!(env.evaluate("isDevelopment").unwrap());
        assert!(env.evaluate("isCI").unwrap());
        assert!(env.evaluate("isStartCommand").unwrap());
        assert!(!env.evaluate("isMasterBranch").unwrap());
        assert_eq!(env.branch(), Some("feature/x"));
    }

    #[test]
    fn test_branch_fallback_variable() {
        let env =
            Environment::from_lookup(Command::Build, lookup(&[("BRANCH", "master")])).unwrap();
        assert!(env.check(Condition::IsMasterBranch));
    }

    #[test]
    fn test_ci_flag_is_strict() {
        let env = Environment::from_lookup(Command::Build, lookup(&[("CI", "yes")])).unwrap();
        assert!(!env.is_ci());
        let env = Environment::from_lookup(Command::Build, lookup(&[("CI", "1")])).unwrap();
        assert!(env.is_ci());
    }

    #[test]
    fn test_invalid_mode_is_error() {
        let err = Environment::from_lookup(Command::Build, lookup(&[("NODE_ENV", "staging")]))
            .unwrap_err();
        assert!(err.to_string().contains("staging"));
    }

    #[test]
    fn test_unknown_condition() {
        let env = Environment::default();
        let err = env.evaluate("isFriday").unwrap_err();
        assert!(matches!(err, PresetError::UnknownCondition(name) if name == "isFriday"));
    }

    #[test]
    fn test_condition_names_round_trip_through_from_str() {
        for condition in Condition::ALL {
            assert_eq!(condition.as_str().parse::<Condition>().unwrap(), condition);
        }
    }

    #[test]
    fn test_test_env() {
        let env = Environment::new(Mode::Test, Command::Test);
        assert!(env.check(Condition::IsTestEnv));
        assert!(!env.check(Condition::IsProduction));
        assert!(!env.check(Condition::IsBuildCommand));
    }
}
