//! # Jouken - Pick-List Condition Extraction and Rule Evaluation
//!
//! **Jouken** reads form layouts (sections of fields, some of them pick lists)
//! and turns the conditional `maps` declared on pick-list values into rules of
//! the form *"when field X is V, apply these effects"*. The rules can then be
//! compiled and evaluated against form values.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Parse a layout with [`LayoutLoader`](layout::LayoutLoader), or convert
//!     your own representation through the [`IntoLayout`](layout::IntoLayout) trait.
//! 2.  **Extract**: Run a [`ConditionExtractor`](extractor::ConditionExtractor) over the
//!     document. One rule is produced per pick-list value that declares `maps`.
//! 3.  **Compile**: Lower rule conditions into expressions with a
//!     [`RuleCompiler`](compiler::RuleCompiler).
//! 4.  **Evaluate**: Run an [`Evaluator`](evaluator::Evaluator) against
//!     [`FormValues`](data::FormValues) to learn which effects apply.
//! 5.  **Apply**: Drive a [`FormState`](form::FormState) to see which fields and
//!     sections are visible, which values remain on offer and whether the form
//!     is valid.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jouken::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // 1. Load `fixture.json` from the working directory.
//!     let document = LayoutLoader::from_default_fixture()?;
//!
//!     // 2. Extract rules. Dependent values are ignored unless asked for.
//!     let extractor = ConditionExtractor::builder()
//!         .with_dependents(DependentPolicy::Fulfill)
//!         .build();
//!     let rules = extractor.extract(&document)?;
//!     RuleSet::new(rules.clone()).write_to(std::io::stdout(), true)?;
//!
//!     // 3. + 4. Compile and evaluate against the layout's starting values.
//!     let evaluator = Evaluator::from_rules(&rules, &RuleCompiler::default())?;
//!     let values = initial_values(&document, &FormValues::new());
//!     for outcome in evaluator.eval(&values)? {
//!         println!("rule {} -> {} ({})", outcome.rule_index, outcome.fulfilled, outcome.reason);
//!     }
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod compiler;
pub mod data;
pub mod error;
pub mod evaluator;
pub mod extractor;
pub mod form;
pub mod layout;
pub mod prelude;
pub mod rule;
pub mod trace;
