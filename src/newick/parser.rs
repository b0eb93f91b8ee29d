//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, configured by
//! [ParserOptions], which turns one Newick string into a [TreeNode]
//! hierarchy or a [ParsingError].

use crate::model::TreeNode;
use crate::newick::defs::{ANNOTATION_CLOSE, ANNOTATION_OPEN, DEFAULT_NODE_CAPACITY};
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use crate::parser::utils::is_quote;
use serde::Deserialize;
use tracing::{debug, trace};

/// Outcome of parsing one Newick string.
pub type ParseOutcome = Result<TreeNode, ParsingError>;

// =#========================================================================#=
// PARSER OPTIONS
// =#========================================================================$=
/// Configuration of a [NewickParser].
///
/// # Configuration
/// * [`with_bootstrap_values()`](Self::with_bootstrap_values)
///     - Text after the `)` of an internal node is stored as
///       [TreeNode::bootstrap_value] instead of its name.
/// * [`with_root_name(name)`](Self::with_root_name)
///     - Names the synthetic root, unless the string itself names it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Store internal node text as bootstrap value
    pub bootstrap_values: bool,
    /// Name given to the synthetic root
    pub root_name: Option<String>,
}

impl ParserOptions {
    /// Configures bootstrap-value mode.
    pub fn with_bootstrap_values(mut self) -> Self {
        self.bootstrap_values = true;
        self
    }

    /// Configures the default name of the root.
    pub fn with_root_name<S: Into<String>>(mut self, name: S) -> Self {
        self.root_name = Some(name.into());
        self
    }
}

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for Newick strings with arbitrary arity.
///
/// Parsing is a single left-to-right scan over the bytes of the string with
/// an explicit stack of nodes under construction. Each call is independent;
/// a parser can be reused for any number of strings.
///
/// # Format
/// * Text before the first `(` is skipped; input without any `(` is read
///   as a single bare node
/// * Nodes are separated by `,` and grouped by `(` and `)`
/// * A name is either plain text or quoted with `'` or `"`; inside quotes a
///   doubled delimiter stands for one literal delimiter
/// * `:` starts the branch-length text, kept verbatim
/// * `{...}` holds one annotation per node, not nested
/// * Whitespace outside quotes and annotations is skipped
/// * `;` ends the tree; anything after it is ignored
///
/// # Example
/// ```
/// use multihit::newick::NewickParser;
///
/// let tree = NewickParser::new().parse_str("(A:1,B:2)C;").unwrap();
/// assert_eq!(tree.name(), Some("C"));
/// assert_eq!(tree.children[0].attribute, "1");
/// assert_eq!(tree.children[1].name(), Some("B"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewickParser {
    options: ParserOptions,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default [ParserOptions].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [NewickParser] with the given options.
    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Configures bootstrap-value mode, see [ParserOptions].
    pub fn with_bootstrap_values(mut self) -> Self {
        self.options.bootstrap_values = true;
        self
    }

    /// Configures the default root name, see [ParserOptions].
    pub fn with_root_name<S: Into<String>>(mut self, name: S) -> Self {
        self.options.root_name = Some(name.into());
        self
    }

    /// Get ref to the current options
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses a single Newick string.
    ///
    /// # Arguments
    /// * `newick` - The Newick string; a terminating `;` is optional
    ///
    /// # Returns
    /// * `Ok(TreeNode)` - The root of the parsed tree. A root is synthesized
    ///   even if the string has no parenthesized structure.
    /// * `Err(ParsingError)` - If the string is malformed
    pub fn parse_str<S: AsRef<str>>(&self, newick: S) -> ParseOutcome {
        let newick = newick.as_ref();
        debug!(len = newick.len(), "parsing Newick string");

        let scan = NewickScan::new(ByteParser::for_str(newick), &self.options);
        let root = scan.run()?;

        debug!(
            nodes = root.num_nodes(),
            leaves = root.num_leaves(),
            "parsed Newick string"
        );
        Ok(root)
    }
}

// =#========================================================================#=
// SCAN (one parse call)
// =#========================================================================$=
/// States of the scanning automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Before the first `(`
    SeekOpen,
    /// Reading the name (`in_attribute == false`) or the branch-length text
    Node { in_attribute: bool },
    /// Inside a quoted name opened by `delimiter` at `start`
    Quoted { delimiter: u8, start: usize },
    /// Inside `{...}` opened at `start`
    Annotation { start: usize },
}

/// Transient state of a single [NewickParser::parse_str] call.
struct NewickScan<'a, 'o> {
    parser: ByteParser<'a>,
    options: &'o ParserOptions,
    state: ScanState,
    /// Nodes under construction; the bottom one is the root
    stack: Vec<TreeNode>,
    /// Whether the input holds a `(`; if not, it is read as a bare root node
    has_structure: bool,
    name: Vec<u8>,
    attribute: Vec<u8>,
    annotation: Vec<u8>,
}

impl<'a, 'o> NewickScan<'a, 'o> {
    fn new(parser: ByteParser<'a>, options: &'o ParserOptions) -> Self {
        let mut stack = Vec::with_capacity(DEFAULT_NODE_CAPACITY);
        stack.push(TreeNode::with_name(options.root_name.clone()));

        Self {
            has_structure: parser.contains(b'('),
            parser,
            options,
            state: ScanState::SeekOpen,
            stack,
            name: Vec::new(),
            attribute: Vec::new(),
            annotation: Vec::new(),
        }
    }

    /// Runs the automaton to the end of input or the first `;`.
    fn run(mut self) -> ParseOutcome {
        while let Some(b) = self.parser.peek() {
            if self.state == ScanState::SeekOpen && !self.seek_open(b) {
                continue;
            }
            self.parser.next_byte();

            let done = match self.state {
                ScanState::SeekOpen => false,
                ScanState::Node { in_attribute } => self.read_node(b, in_attribute)?,
                ScanState::Quoted { delimiter, .. } => {
                    self.read_quoted(b, delimiter);
                    false
                }
                ScanState::Annotation { .. } => {
                    self.read_annotation(b)?;
                    false
                }
            };

            if done {
                break;
            }
        }

        self.finish()
    }

    /// Handles `b` before any structure was opened.
    ///
    /// Everything before the first `(` is skipped. Input without any `(` is
    /// a bare root node, so `b` switches to the node state and returns
    /// `true` to be processed there.
    fn seek_open(&mut self, b: u8) -> bool {
        if b == b'(' {
            self.parser.next_byte();
            self.add_new_tree_level();
            self.state = ScanState::Node {
                in_attribute: false,
            };
            return false;
        }
        if self.has_structure || b.is_ascii_whitespace() {
            self.parser.next_byte();
            return false;
        }
        self.state = ScanState::Node {
            in_attribute: false,
        };
        true
    }

    /// Handles `b` while reading a name or branch-length text.
    ///
    /// Returns `true` if the scan is terminated by `;`.
    fn read_node(&mut self, b: u8, in_attribute: bool) -> Result<bool, ParsingError> {
        match b {
            b':' => {
                self.state = ScanState::Node { in_attribute: true };
            }
            b',' | b')' => {
                self.finish_node_definition()?;
                self.state = ScanState::Node {
                    in_attribute: false,
                };
                if b == b',' {
                    self.add_new_tree_level();
                }
            }
            b'(' => {
                if !self.name.is_empty() {
                    return Err(self.error(ParsingErrorType::NameBeforeOpening));
                }
                self.add_new_tree_level();
            }
            b if is_quote(b) => {
                if in_attribute
                    || !self.name.is_empty()
                    || !self.attribute.is_empty()
                    || !self.annotation.is_empty()
                {
                    return Err(self.error(ParsingErrorType::StrayCharacter));
                }
                self.state = ScanState::Quoted {
                    delimiter: b,
                    start: self.parser.position() - 1,
                };
            }
            ANNOTATION_OPEN => {
                if !self.annotation.is_empty() {
                    return Err(self.error(ParsingErrorType::ReopenedAnnotation));
                }
                self.state = ScanState::Annotation {
                    start: self.parser.position() - 1,
                };
            }
            b';' => return Ok(true),
            b if b.is_ascii_whitespace() => {}
            b if in_attribute => self.attribute.push(b),
            b => self.name.push(b),
        }
        Ok(false)
    }

    /// Handles `b` inside a quoted name.
    fn read_quoted(&mut self, b: u8, delimiter: u8) {
        if b != delimiter {
            self.name.push(b);
        } else if self.parser.consume_if(delimiter) {
            // Doubled delimiter
            self.name.push(delimiter);
        } else {
            self.state = ScanState::Node {
                in_attribute: false,
            };
        }
    }

    /// Handles `b` inside an annotation.
    fn read_annotation(&mut self, b: u8) -> Result<(), ParsingError> {
        match b {
            ANNOTATION_CLOSE => {
                self.state = ScanState::Node { in_attribute: true };
            }
            ANNOTATION_OPEN => return Err(self.error(ParsingErrorType::ReopenedAnnotation)),
            b => self.annotation.push(b),
        }
        Ok(())
    }

    /// Pushes a new, empty node as child level of the current top.
    fn add_new_tree_level(&mut self) {
        self.stack.push(TreeNode::new());
    }

    /// Pops the current node, assigns the accumulated text and attaches it
    /// to its parent.
    fn finish_node_definition(&mut self) -> Result<(), ParsingError> {
        if self.stack.len() < 2 {
            return Err(self.error(ParsingErrorType::UnbalancedParentheses));
        }
        let mut node = self.stack.pop().unwrap_or_default();

        let name = take_text(&mut self.name);
        if self.options.bootstrap_values && !node.is_leaf() {
            node.bootstrap_value = Some(name);
        } else {
            node.name = Some(name);
        }
        node.attribute = take_text(&mut self.attribute);
        node.annotation = take_text(&mut self.annotation);

        trace!(
            name = node.name(),
            attribute = node.attribute.as_str(),
            children = node.children.len(),
            "finished node"
        );

        if let Some(parent) = self.stack.last_mut() {
            parent.add_child(node);
        }
        Ok(())
    }

    /// Checks the final state and returns the root.
    fn finish(mut self) -> ParseOutcome {
        let end = self.parser.position().saturating_sub(1);
        match self.state {
            ScanState::Quoted { start, .. } => {
                return Err(ParsingError::at(
                    ParsingErrorType::UnterminatedQuote,
                    &self.parser,
                    start,
                ));
            }
            ScanState::Annotation { start } => {
                return Err(ParsingError::at(
                    ParsingErrorType::UnterminatedAnnotation,
                    &self.parser,
                    start,
                ));
            }
            _ => {}
        }

        if self.stack.len() != 1 {
            return Err(ParsingError::at(
                ParsingErrorType::UnbalancedParentheses,
                &self.parser,
                end,
            ));
        }

        let mut root = self.stack.pop().unwrap_or_default();
        if !self.name.is_empty() {
            root.name = Some(take_text(&mut self.name));
        }
        if !self.attribute.is_empty() {
            root.attribute = take_text(&mut self.attribute);
        }
        if !self.annotation.is_empty() {
            root.annotation = take_text(&mut self.annotation);
        }
        Ok(root)
    }

    /// Error for the byte just consumed.
    fn error(&self, kind: ParsingErrorType) -> ParsingError {
        ParsingError::at_last(kind, &self.parser)
    }
}

/// Drains an accumulator into a [String].
///
/// Accumulators are only ever split at ASCII delimiters, so their content is
/// valid UTF-8 whenever the input was.
fn take_text(buffer: &mut Vec<u8>) -> String {
    let text = String::from_utf8_lossy(buffer).into_owned();
    buffer.clear();
    text
}
