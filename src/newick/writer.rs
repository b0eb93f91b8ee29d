//! Newick string writing for [TreeNode] hierarchies.

use crate::model::TreeNode;
use crate::newick::defs::CHARS_PER_NODE_GUESS;
use crate::parser::utils::quote_name;

/// Returns the Newick representation of this tree with closing semicolon.
///
/// Each node is written as `children name{annotation}:attribute`, leaving
/// out empty parts. Names are quoted if necessary; an internal node's
/// bootstrap value, if present, takes the place of its name. Parsing the
/// result with a [NewickParser](crate::newick::NewickParser) configured the
/// same way yields an equal tree (labels and tags aside).
///
/// # Example
/// ```
/// use multihit::model::TreeNode;
/// use multihit::newick::to_newick;
///
/// let tree = TreeNode::new()
///     .with_child(TreeNode::leaf("Little Spotted Kiwi").with_attribute("1.0"))
///     .with_child(TreeNode::leaf("Okarito").with_attribute("1.5"));
///
/// assert_eq!(to_newick(&tree), "('Little Spotted Kiwi':1.0,Okarito:1.5);");
/// ```
pub fn to_newick(tree: &TreeNode) -> String {
    let mut newick = String::with_capacity(tree.num_nodes() * CHARS_PER_NODE_GUESS);

    let mut steps = vec![WriteStep::Open(tree)];
    while let Some(step) = steps.pop() {
        match step {
            WriteStep::Open(node) if node.is_leaf() => write_node_text(node, &mut newick),
            WriteStep::Open(node) => {
                newick.push('(');
                steps.push(WriteStep::Close(node));
                for (i, child) in node.children.iter().enumerate().rev() {
                    steps.push(WriteStep::Open(child));
                    if i > 0 {
                        steps.push(WriteStep::Separator);
                    }
                }
            }
            WriteStep::Close(node) => {
                newick.push(')');
                write_node_text(node, &mut newick);
            }
            WriteStep::Separator => newick.push(','),
        }
    }
    newick.push(';');

    newick
}

/// Pending output of [to_newick], processed from a stack.
enum WriteStep<'a> {
    /// Write the node, or open its child list
    Open(&'a TreeNode),
    /// Close the child list, then write the node's own text
    Close(&'a TreeNode),
    /// `,` between siblings
    Separator,
}

/// Appends `name{annotation}:attribute` of a single node, leaving out empty
/// parts.
fn write_node_text(node: &TreeNode, newick: &mut String) {
    match (&node.bootstrap_value, node.name()) {
        (Some(support), _) if !node.is_leaf() => newick.push_str(&quote_name(support)),
        (_, Some(name)) => newick.push_str(&quote_name(name)),
        _ => {}
    }

    if !node.annotation.is_empty() {
        newick.push('{');
        newick.push_str(&node.annotation);
        newick.push('}');
    }

    if !node.attribute.is_empty() {
        newick.push(':');
        newick.push_str(&node.attribute);
    }
}
