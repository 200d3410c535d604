//! Interactive scheme entry with per-line findings.

use anyhow::{bail, Result};
use colored::Colorize;
use std::io::BufRead;

use opgraph_core::scheme::{SchemeReader, END_MARKER};
use opgraph_core::{SchemeCompiler, SchemeGrammar, SchemeReport};

fn print_instructions(compiler: &SchemeCompiler) {
    let example = match compiler.grammar() {
        SchemeGrammar::Indexed { .. } => "1->2->3",
        SchemeGrammar::Literal => "load->total->report",
    };
    eprintln!();
    eprintln!("{}", "Enter the scheme, one chain per line.".bold());
    eprintln!("  Example: {}", example.cyan());
    eprintln!("  Finish with a line containing '{}'.", END_MARKER);
}

/// Prints every rejected line with its findings.
pub fn print_findings(report: &SchemeReport) {
    eprintln!("\n{}", "Errors found in the scheme:".red().bold());
    for line in report.rejected_lines() {
        let findings: Vec<&str> = line.findings.iter().map(|f| f.description()).collect();
        eprintln!(
            "  Line {} \"{}\": {}",
            line.line,
            line.text,
            findings.join("; ").yellow()
        );
    }
}

/// Reads schemes from `input` until one has no findings.
///
/// Fails if input ends while the last scheme entered is still invalid.
pub fn prompt_until_valid<R: BufRead>(compiler: &SchemeCompiler, input: R) -> Result<Vec<String>> {
    print_instructions(compiler);
    let mut reader = SchemeReader::new(input);

    loop {
        let Some(lines) = reader.next_scheme()? else {
            bail!("Input ended before a valid scheme was entered");
        };
        let report = compiler.validate(&lines);
        if report.is_valid() {
            eprintln!("{}", "Scheme accepted.".green());
            return Ok(lines);
        }
        print_findings(&report);
        eprintln!("\n{}", "Please fix the errors and enter the scheme again:".yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_accepts_first_valid_scheme() {
        let compiler = SchemeCompiler::indexed(["a", "b"]);

        let lines = prompt_until_valid(&compiler, Cursor::new("1->2\nend\n")).unwrap();

        assert_eq!(lines, ["1->2"]);
    }

    #[test]
    fn test_re_prompts_after_invalid_scheme() {
        let compiler = SchemeCompiler::indexed(["a", "b"]);

        let lines =
            prompt_until_valid(&compiler, Cursor::new("->1\n\nend\n2->1\nend\n")).unwrap();

        assert_eq!(lines, ["2->1"]);
    }

    #[test]
    fn test_fails_when_input_ends_while_invalid() {
        let compiler = SchemeCompiler::literal();

        let err = prompt_until_valid(&compiler, Cursor::new("A->\nend\n")).unwrap_err();

        assert!(err.to_string().contains("Input ended"));
    }

    #[test]
    fn test_scheme_without_end_marker_is_accepted_at_eof() {
        let compiler = SchemeCompiler::literal();

        let lines = prompt_until_valid(&compiler, Cursor::new("A->B")).unwrap();

        assert_eq!(lines, ["A->B"]);
    }
}
