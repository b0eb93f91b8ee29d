//! Constants for the Newick parser and writer.

/// Opens a node annotation
pub(crate) const ANNOTATION_OPEN: u8 = b'{';

/// Closes a node annotation
pub(crate) const ANNOTATION_CLOSE: u8 = b'}';

/// Initial capacity of the builder stack, i.e. a depth guess
pub(crate) const DEFAULT_NODE_CAPACITY: usize = 16;

/// Guess for characters per node when estimating Newick length
pub(crate) const CHARS_PER_NODE_GUESS: usize = 12;
