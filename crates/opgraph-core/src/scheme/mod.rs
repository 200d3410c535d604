//! Scheme text: validation and compilation into an operation graph.
//!
//! A scheme is a list of lines such as `1->2->3`. Each line is a chain of
//! operations; consecutive tokens become edges. Validation reports every
//! finding per line so the whole scheme can be corrected at once.
//!
//! # Example
//!
//! ```rust,ignore
//! use opgraph_core::graph::OperationGraph;
//! use opgraph_core::scheme::SchemeCompiler;
//!
//! let mut graph = OperationGraph::new();
//! let compiler = SchemeCompiler::literal();
//! compiler.compile(&["A->B->C", "B->D->C"], &mut graph)?;
//! assert_eq!(graph.count(), 4);
//! ```

mod compiler;
mod grammar;
mod source;


pub use compiler::{CompileSummary, SchemeCompiler};
pub use grammar::{
    split_tokens, LineFindings, SchemeFinding, SchemeGrammar, SchemeReport, DELIMITER, END_MARKER,
};
pub use source::{read_scheme, SchemeReader};
