//! Semantic checker for the timed-automata model built by `ta-model`.
//!
//! Organized into one submodule per concern, each contributing an `impl`
//! block onto [`context::Checker`]:
//! - `context` - `Checker` and `CheckerOptions`, the shared state every
//!   other module extends
//! - `error_reporter` - diagnostic emission and side-effect checking
//! - `type_predicates` - prefix/category queries over `TypeId`
//! - `compile_time` - the compile-time-computability pre-pass (§4.3)
//! - `compatibility` - structural equivalence and assignability (§4.2)
//! - `rate_decomposer` - invariant-with-rate splitting (§4.4)
//! - `expr_checker` - expression type computation (§4.5)
//! - `type_wellformedness` - type declaration checking (§4.6)
//! - `statement_checker` - statement shape checking (§4.7)
//! - `initialiser_checker` - literal initialiser shape matching
//! - `declaration_checker` - the system traversal (§4.8)
//! - `property_checker` - query/property checking (§4.9)
//! - `dispatch` - the top-level entry point tying the above together
pub mod compatibility;
pub mod compile_time;
pub mod context;
pub mod declaration_checker;
pub mod dispatch;
pub mod error_reporter;
pub mod expr_checker;
pub mod initialiser_checker;
pub mod property_checker;
pub mod rate_decomposer;
pub mod statement_checker;
pub mod type_predicates;
pub mod type_wellformedness;

pub use context::{Checker, CheckerOptions};
pub use dispatch::{check_system, check_system_with_options};
