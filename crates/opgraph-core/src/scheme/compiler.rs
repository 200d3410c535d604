//! Scheme compilation into an [`OperationGraph`].

use serde::Serialize;

use super::grammar::{split_tokens, LineFindings, SchemeGrammar, SchemeReport};
use crate::graph::{GraphNode, OperationGraph};

/// Counts produced by materializing a scheme.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompileSummary {
    /// Scheme lines processed.
    pub lines: usize,
    /// Nodes created because their id was not yet registered.
    pub nodes_created: usize,
    /// Edges appended to adjacency lists.
    pub edges_created: usize,
}

/// Parses scheme lines and builds the graph they describe.
///
/// Each line `T1->T2->...->Tk` names operations; every consecutive pair
/// `(Ti, Ti+1)` becomes an edge. A node is created the first time its id is
/// mentioned and reused afterwards.
#[derive(Debug, Clone)]
pub struct SchemeCompiler {
    grammar: SchemeGrammar,
}

impl SchemeCompiler {
    /// Creates a compiler for the given grammar.
    #[must_use]
    pub fn new(grammar: SchemeGrammar) -> Self {
        Self { grammar }
    }

    /// Creates a compiler whose tokens are 1-based indices into `ids`.
    pub fn indexed<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(SchemeGrammar::indexed(ids))
    }

    /// Creates a compiler whose tokens are operation ids.
    #[must_use]
    pub fn literal() -> Self {
        Self::new(SchemeGrammar::Literal)
    }

    /// Returns the grammar in use.
    #[must_use]
    pub fn grammar(&self) -> &SchemeGrammar {
        &self.grammar
    }

    /// Checks every line and collects all findings.
    ///
    /// Never stops at the first problem; a line can carry several findings.
    pub fn validate<S: AsRef<str>>(&self, lines: &[S]) -> SchemeReport {
        let rejected = lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| {
                let text = line.as_ref();
                let findings = self.grammar.check_line(text);
                (!findings.is_empty()).then(|| LineFindings {
                    line: i + 1,
                    text: text.to_string(),
                    findings,
                })
            })
            .collect();
        SchemeReport::new(lines.len(), rejected)
    }

    /// Builds nodes and edges for already validated lines.
    ///
    /// Tokens that do not resolve to an id are skipped, so this never
    /// panics on unvalidated input, but callers should use [`compile`]
    /// unless the lines were checked.
    ///
    /// [`compile`]: Self::compile
    pub fn materialize<S: AsRef<str>>(
        &self,
        lines: &[S],
        graph: &mut OperationGraph,
    ) -> CompileSummary {
        let mut summary = CompileSummary::default();

        for line in lines {
            summary.lines += 1;
            let mut previous: Option<&str> = None;

            for token in split_tokens(line.as_ref()) {
                let Some(id) = self.grammar.resolve(token) else {
                    continue;
                };
                if !graph.exists_id(id) {
                    graph.add_node(GraphNode::new(id));
                    summary.nodes_created += 1;
                }
                if let Some(source) = previous {
                    summary.edges_created += graph.connect_by_id(source, &[id]);
                }
                previous = Some(id);
            }
        }

        tracing::debug!(
            lines = summary.lines,
            nodes = summary.nodes_created,
            edges = summary.edges_created,
            "scheme materialized"
        );
        summary
    }

    /// Validates the scheme and, when it has no findings, builds it.
    ///
    /// # Errors
    ///
    /// Returns the report when any line has a finding; the graph is left
    /// untouched in that case.
    pub fn compile<S: AsRef<str>>(
        &self,
        lines: &[S],
        graph: &mut OperationGraph,
    ) -> Result<CompileSummary, SchemeReport> {
        let report = self.validate(lines);
        if !report.is_valid() {
            tracing::debug!(rejected = report.rejected_lines().len(), "scheme rejected");
            return Err(report);
        }
        Ok(self.materialize(lines, graph))
    }
}
