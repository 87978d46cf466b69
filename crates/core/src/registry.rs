//! Targets and the registry they load into.
//!
//! The registry is populated once while a rule file loads and is read-only
//! afterward. Redefining a target is not an error: the new dependencies are
//! prepended to the old list and the old commands are dropped, with a
//! warning recorded for the caller to surface.

use std::collections::HashMap;

use crate::types::{MakeError, MakeResult};

/// One executable command line of a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The command line with any leading `@` stripped.
    pub text: String,
    /// True when a leading `@` asked for the echo to be suppressed.
    pub suppressed: bool,
}

impl Command {
    /// Parse a raw command line into its text and suppression flag.
    ///
    /// Returns `None` when nothing executable remains: a blank line or a
    /// bare `@`.
    pub fn parse(raw_line: &str) -> Option<Self> {
        let trimmed = raw_line.trim();
        let (suppressed, text) = match trimmed.strip_prefix('@') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            suppressed,
        })
    }
}

/// A named build unit: ordered dependencies plus ordered commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub dependencies: Vec<String>,
    pub commands: Vec<Command>,
}

/// All targets declared by a rule file, keyed by name.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: HashMap<String, Target>,
    warnings: Vec<String>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a target with its dependency list.
    ///
    /// Redeclaring an existing name prepends the new dependencies to the
    /// old list, discards the old commands, and records a warning. Order
    /// and duplicates within each list are preserved as written.
    pub fn declare_target(&mut self, name: &str, dependencies: &[&str]) -> MakeResult<()> {
        if name.is_empty() {
            return Err(MakeError::NoTarget);
        }

        let new_dependencies: Vec<String> =
            dependencies.iter().map(|dep| dep.to_string()).collect();

        if let Some(existing) = self.targets.get_mut(name) {
            let mut merged = new_dependencies;
            merged.append(&mut existing.dependencies);
            existing.dependencies = merged;
            existing.commands.clear();
            self.warnings
                .push(format!("overriding commands for target '{}'", name));
        } else {
            self.targets.insert(
                name.to_string(),
                Target {
                    name: name.to_string(),
                    dependencies: new_dependencies,
                    commands: Vec::new(),
                },
            );
        }

        Ok(())
    }

    /// Append a command line to the target currently being defined.
    ///
    /// An empty `current_target` means the command appeared before any rule
    /// line, which is a format error. Lines that parse to no command are
    /// silently dropped.
    pub fn append_command(&mut self, current_target: &str, raw_line: &str) -> MakeResult<()> {
        if current_target.is_empty() {
            return Err(MakeError::InvalidMakefileFormat {
                line: raw_line.trim().to_string(),
            });
        }

        if let Some(command) = Command::parse(raw_line) {
            self.targets
                .entry(current_target.to_string())
                .or_insert_with(|| Target {
                    name: current_target.to_string(),
                    dependencies: Vec::new(),
                    commands: Vec::new(),
                })
                .commands
                .push(command);
        }

        Ok(())
    }

    /// Look up a target by name.
    pub fn get(&self, name: &str) -> Option<&Target> {
        self.targets.get(name)
    }

    /// Iterate over all registered targets in unspecified order.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    /// Warnings recorded during the load phase, in encounter order.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
