//! Crate for the front end of a textual JVM assembly language.
//!
//! The pipeline is:
//! - [`tokenizer::tokenize`] turns source text into a flat list of [`Token`][token::Token]s,
//! - a structural grouping step (not part of this crate) turns the tokens into raw [`Element`][ast::Element]s,
//! - [`AstProcessor::process`][processor::AstProcessor::process] validates the raw declarations and
//!   resolves them into [`Class`][ast::specific::Class], [`Field`][ast::specific::Field] and
//!   [`Method`][ast::specific::Method] nodes.
//!
//! All stages are error tolerant: problems are recorded in an [`ErrorCollector`][error::ErrorCollector]
//! and processing continues with the next sibling, so that a single run reports every problem.
//!
//! What instructions exist and what their operands look like is decided by a
//! [`BytecodeFormat`][operand::BytecodeFormat].

pub mod location;
pub mod token;
pub mod tokenizer;
pub mod number;
pub mod error;
pub mod ast;
pub mod modifiers;
pub mod context;
pub mod operand;
pub mod processor;
