//! Core engine of minimake, a minimal make-style build runner.
//!
//! A rule file declares named targets, the targets they depend on, and the
//! command lines that realize them. Building a [`Make`] parses and validates
//! the whole file up front; running a target then executes its transitive
//! dependency closure in dependency-first order, one command at a time.
//!
//! ## Architecture
//!
//! - [`make`] - build orchestration: load, validate, run
//! - [`rulefile`] - rule-file line classification
//! - [`registry`] - targets, their commands, and the registry they load into
//! - [`graph`] - dependency graph projection, cycle detection, ordering
//! - [`executor`] - child-process execution of single commands
//! - [`types`] - the error type and result alias
//!
//! ## Usage
//!
//! ```rust,no_run
//! use minimake_core::Make;
//!
//! # fn example() -> minimake_core::MakeResult<()> {
//! let make = Make::build("hello:\n\techo hello\n")?;
//! make.run("hello")?;
//! # Ok(())
//! # }
//! ```

pub mod executor;
pub mod graph;
pub mod make;
pub mod registry;
pub mod rulefile;
pub mod types;

pub use graph::DepGraph;
pub use make::Make;
pub use registry::{Command, Target, TargetRegistry};
pub use types::{MakeError, MakeResult};
