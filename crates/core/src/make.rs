//! High-level build orchestration.
//!
//! [`Make`] ties the pieces together: [`Make::build`] feeds a rule file
//! through the line classifier into a registry, projects the dependency
//! graph, and rejects cycles; [`Make::run`] resolves one target's
//! dependency-first order and executes every command along it. A build is
//! immutable once constructed and can serve any number of runs; nothing is
//! memoized between them.

use crate::executor;
use crate::graph::DepGraph;
use crate::registry::{Target, TargetRegistry};
use crate::rulefile::{self, Line};
use crate::types::{MakeError, MakeResult};

/// A validated build: the loaded registry plus its projected graph.
#[derive(Debug)]
pub struct Make {
    registry: TargetRegistry,
    graph: DepGraph,
}

impl Make {
    /// Load and validate a rule file.
    ///
    /// Classification errors surface immediately with the offending line.
    /// Once every line is in, the dependency graph is projected and scanned
    /// for cycles, so a successfully built [`Make`] is guaranteed acyclic.
    pub fn build(rule_text: &str) -> MakeResult<Self> {
        let mut registry = TargetRegistry::new();
        let mut current_target = String::new();

        for raw_line in rule_text.lines() {
            match rulefile::classify_line(raw_line)? {
                Line::Rule { name, dependencies } => {
                    registry.declare_target(name, &dependencies)?;
                    current_target = name.to_string();
                }
                Line::Command(text) => registry.append_command(&current_target, text)?,
                Line::Ignored => {}
            }
        }

        let graph = DepGraph::from_registry(&registry);
        let cycle = graph.find_cycle();
        if !cycle.is_empty() {
            return Err(MakeError::CyclicDependency { path: cycle });
        }

        Ok(Self { registry, graph })
    }

    /// Execute `target` and its transitive dependencies, dependencies first.
    ///
    /// Every name in the resolved order must have a rule. The first missing
    /// name or failing command aborts the run: targets earlier in the order
    /// have already run to completion at that point, later ones never start.
    pub fn run(&self, target: &str) -> MakeResult<()> {
        for name in self.dependency_order(target)? {
            let resolved = self
                .registry
                .get(&name)
                .ok_or_else(|| MakeError::DependencyNotFound {
                    target: target.to_string(),
                    dependency: name.clone(),
                })?;

            for command in &resolved.commands {
                executor::execute(command)?;
            }
        }
        Ok(())
    }

    /// Dependency-first order for `target` without executing anything.
    ///
    /// Errors only when `target` itself has no rule; dangling names deeper
    /// in the closure are reported as part of the order.
    pub fn dependency_order(&self, target: &str) -> MakeResult<Vec<String>> {
        if self.registry.get(target).is_none() {
            return Err(MakeError::TargetNotFound(target.to_string()));
        }
        Ok(self.graph.dependency_order(target))
    }

    /// All registered target names, sorted for stable output.
    pub fn target_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .registry
            .targets()
            .map(|target| target.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Look up one target's rule.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.registry.get(name)
    }

    /// Warnings recorded while loading, in encounter order.
    pub fn warnings(&self) -> &[String] {
        self.registry.warnings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = concat!(
        "build:\n",
        "\t@echo 'executing build'\n",
        "\t@echo 'cmd2'\n",
        "test:\n",
        "\techo 'executing test'\n",
        "\n",
        "publish : test gendocs\n",
        "\techo 'executing publish'\n",
        "\n",
        " gendocs  : build\n",
        "\techo 'executing gendocs'\n",
    );

    #[test]
    fn builds_the_sample_rule_file() {
        let make = Make::build(RULES).unwrap();

        assert_eq!(make.target_names(), vec!["build", "gendocs", "publish", "test"]);

        let publish = make.target("publish").unwrap();
        assert_eq!(publish.dependencies, vec!["test", "gendocs"]);
        assert_eq!(publish.commands.len(), 1);
        assert!(!publish.commands[0].suppressed);

        let build = make.target("build").unwrap();
        assert!(build.dependencies.is_empty());
        assert_eq!(build.commands.len(), 2);
        assert!(build.commands.iter().all(|command| command.suppressed));
        assert_eq!(build.commands[0].text, "echo 'executing build'");

        assert!(make.warnings().is_empty());
    }

    #[test]
    fn orders_the_closure_dependencies_first() {
        let make = Make::build(RULES).unwrap();
        assert_eq!(
            make.dependency_order("publish").unwrap(),
            vec!["test", "build", "gendocs", "publish"]
        );
        assert_eq!(make.dependency_order("gendocs").unwrap(), vec!["build", "gendocs"]);
        assert_eq!(make.dependency_order("build").unwrap(), vec!["build"]);
    }

    #[test]
    fn runs_the_sample_end_to_end() {
        let make = Make::build(RULES).unwrap();
        make.run("publish").unwrap();
    }

    #[test]
    fn redefinition_merges_dependencies_and_replaces_commands() {
        let rules = concat!(
            "a: b b\n",
            "\techo 'a'\n",
            "a: c\n",
            "\techo 'newa'\n",
            "c:\n",
            "\techo 'c'\n",
            "b:\n",
            "\techo 'b'\n",
        );
        let make = Make::build(rules).unwrap();

        let target = make.target("a").unwrap();
        assert_eq!(target.dependencies, vec!["c", "b", "b"]);
        assert_eq!(target.commands.len(), 1);
        assert_eq!(target.commands[0].text, "echo 'newa'");

        assert_eq!(make.warnings(), &["overriding commands for target 'a'"]);
        assert_eq!(make.dependency_order("a").unwrap(), vec!["c", "b", "a"]);
    }

    #[test]
    fn a_cyclic_rule_file_fails_to_build() {
        let rules = "a: b\nb: c\nc: a\n";
        let err = Make::build(rules).unwrap_err();
        match err {
            MakeError::CyclicDependency { path } => {
                let mut nodes = path;
                nodes.sort_unstable();
                assert_eq!(nodes, vec!["a", "b", "c"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn a_malformed_line_fails_to_build() {
        let err = Make::build("build\n").unwrap_err();
        match err {
            MakeError::InvalidMakefileFormat { line } => assert_eq!(line, "build"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn a_command_before_any_rule_fails_to_build() {
        let err = Make::build("\t@echo 'too sad'\n").unwrap_err();
        assert!(matches!(err, MakeError::InvalidMakefileFormat { .. }));
    }

    #[test]
    fn a_rule_without_a_target_name_fails_to_build() {
        let err = Make::build(":dep\n").unwrap_err();
        assert!(matches!(err, MakeError::NoTarget));
    }

    #[test]
    fn running_an_unknown_target_fails() {
        let make = Make::build(RULES).unwrap();
        let err = make.run("missing").unwrap_err();
        match err {
            MakeError::TargetNotFound(name) => assert_eq!(name, "missing"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn run_touches_the_whole_closure_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base");
        let mid = dir.path().join("mid");
        let top = dir.path().join("top");
        let rules = format!(
            "base:\n\t@touch {}\nmid: base\n\t@touch {}\ntop: mid\n\t@touch {}\n",
            base.display(),
            mid.display(),
            top.display(),
        );

        let make = Make::build(&rules).unwrap();
        make.run("top").unwrap();

        assert!(base.exists());
        assert!(mid.exists());
        assert!(top.exists());
    }

    #[test]
    fn a_dangling_dependency_stops_the_run_before_its_dependent() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("app-ran");
        let rules = format!("app: ghost\n\t@touch {}\n", marker.display());

        // Dangling names pass the build; they fail the run.
        let make = Make::build(&rules).unwrap();
        let err = make.run("app").unwrap_err();

        match err {
            MakeError::DependencyNotFound { target, dependency } => {
                assert_eq!(target, "app");
                assert_eq!(dependency, "ghost");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!marker.exists());
    }

    #[test]
    fn a_failing_command_aborts_everything_after_it() {
        let dir = tempfile::tempdir().unwrap();
        let before = dir.path().join("before");
        let after = dir.path().join("after");
        let rules = format!(
            concat!(
                "app: dep\n",
                "\t@touch {}\n",
                "dep:\n",
                "\t@touch {}\n",
                "\t@no-such-program-here\n",
                "\t@touch {}\n",
            ),
            after.display(),
            before.display(),
            dir.path().join("never").display(),
        );

        let make = Make::build(&rules).unwrap();
        let err = make.run("app").unwrap_err();

        assert!(matches!(err, MakeError::CommandExecutionFailed { .. }));
        assert!(before.exists());
        assert!(!dir.path().join("never").exists());
        assert!(!after.exists());
    }

    #[test]
    fn runs_repeat_without_memoization() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("again");
        let rules = format!("again:\n\t@touch {}\n", marker.display());
        let make = Make::build(&rules).unwrap();

        make.run("again").unwrap();
        assert!(marker.exists());

        std::fs::remove_file(&marker).unwrap();
        make.run("again").unwrap();
        assert!(marker.exists());
    }
}
