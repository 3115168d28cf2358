//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the jouken crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use jouken::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = LayoutLoader::from_path("path/to/layout.json")?;
//! let rules = ConditionExtractor::default().extract(&document)?;
//! println!("{}", RuleSet::new(rules).to_json(true)?);
//! # Ok(())
//! # }
//! ```

// Extraction
pub use crate::extractor::{ConditionExtractor, DependentPolicy, ExtractorBuilder, PICK_LIST};

// Layout model and loading
pub use crate::layout::{
    DEFAULT_FIXTURE, Document, DocumentPath, Field, FieldMap, IntoLayout, LayoutLoader,
    PickListValue, Section, initial_values,
};

// Rules
pub use crate::rule::{Operand, Rule, RuleArgument, RuleFunction, RuleSet};

// Compilation and evaluation
pub use crate::compiler::{CompiledRule, FunctionParser, ParsedArgument, RuleCompiler};
pub use crate::evaluator::{Evaluator, RuleOutcome};

// Form state
pub use crate::form::{FormState, ObjectRef, ObjectState};

// AST and expression types
pub use crate::ast::{EvaluationTrace, Expression, InputSource, Value};

// Runtime data
pub use crate::data::FormValues;

// Error types
pub use crate::error::{EvaluationError, LayoutError, LoadError, OutputError, RuleError};

// Trace formatting
pub use crate::trace::TraceFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
