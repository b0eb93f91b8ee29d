//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [NewickParser] to parse Newick strings into
//! [TreeNode](crate::model::TreeNode) hierarchies and [to_newick] to write them back.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_str`] - parses a single string, returns a [TreeNode](crate::model::TreeNode)
//!
//! # Full API
//! For more control, configure a [NewickParser] with [ParserOptions]:
//! * [`NewickParser::with_bootstrap_values`] - keep internal node text as
//!   support values
//! * [`NewickParser::with_root_name`] - name the synthetic root
//!
//! # Format
//! The accepted grammar is deliberately lenient:
//! * `tree ::= [text] '(' node (',' node)* ')' node_text [';']` or a single
//!   bare `node_text`
//! * `node ::= '(' node (',' node)* ')' node_text | node_text`
//! * `node_text ::= [name] ['{' annotation '}'] [':' attribute]`
//! * `name ::= plain_text | 'quoted''text' | "quoted""text"`
//!
//! Furthermore:
//! * Leading `text` before the first `(` is skipped
//! * Whitespace is skipped everywhere except within quotes and annotations
//! * Branch lengths are not interpreted; any text after `:` up to the next
//!   delimiter is kept as attribute
//! * Nodes may have any number of children

mod defs;
pub mod parser;
pub mod writer;

pub use parser::{NewickParser, ParseOutcome, ParserOptions};
pub use writer::to_newick;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string to obtain a [TreeNode](crate::model::TreeNode).
///
/// This is a convenience function for quick parsing of a single Newick string
/// using default settings and thus not requiring configuration of a parser.
///
/// # Arguments
/// * `newick` - The Newick format string to parse
///
/// # Returns
/// * `TreeNode` - Root of the tree parsed from the string
/// * [ParsingError](crate::parser::ParsingError) - If the string is not
///   valid Newick format
///
/// # Example
/// ```
/// use multihit::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));")?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> ParseOutcome {
    NewickParser::new().parse_str(newick)
}

/// Parses a single Newick string, naming the root unless the string does.
///
/// HyPhy-style label maps key the root as `"root"`, so a tree parsed for
/// [traverse](crate::substitution::traverse) usually needs a root name.
pub fn parse_str_with_root<S: AsRef<str>>(newick: S, root_name: &str) -> ParseOutcome {
    NewickParser::new().with_root_name(root_name).parse_str(newick)
}
