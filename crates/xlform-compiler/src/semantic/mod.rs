//! Semantic checks over compiled criteria

mod reference_checker;

pub use reference_checker::ReferenceChecker;
