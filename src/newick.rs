use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// A rooted phylogenetic tree as a flat node arena with parent/child
/// index links. Node 0 is the root.
#[derive(Debug)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Default)]
pub struct Node {
    pub name: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

impl Tree {
    pub const ROOT: usize = 0;

    pub fn is_leaf(&self, idx: usize) -> bool {
        self.nodes[idx].children.is_empty()
    }

    /// Names of all tips, in the order they appear in the Newick source.
    pub fn tip_names(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.children.is_empty())
            .map(|n| n.name.as_str())
            .collect()
    }

    /// Node indices, children before parents.
    pub fn postorder(&self) -> Vec<usize> {
        let mut order = self.preorder();
        order.reverse();
        order
    }

    /// Node indices, parents before children.
    pub fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![Self::ROOT];
        while let Some(idx) = stack.pop() {
            order.push(idx);
            // Reversed so the leftmost child is visited first.
            stack.extend(self.nodes[idx].children.iter().rev());
        }
        order
    }
}

/// Name every unnamed internal node `NODE_0000000`, `NODE_0000001`, ... in
/// pre-order, the numbering scheme of the augur/treetime toolchain. Tips
/// are left untouched.
pub fn name_unnamed_internals(tree: &mut Tree) {
    let mut counter = 0usize;
    for idx in tree.preorder() {
        if !tree.is_leaf(idx) && tree.nodes[idx].name.is_empty() {
            tree.nodes[idx].name = format!("NODE_{counter:07}");
            counter += 1;
        }
    }
}

pub fn parse_newick_file(path: &Path) -> Result<Tree> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tree {}", path.display()))?;
    parse_newick(&text).with_context(|| format!("malformed Newick in {}", path.display()))
}

/// Parse a single rooted Newick tree.
///
/// Handles nested groups, leaf and internal labels, single-quoted labels
/// (with `''` as an escaped quote), branch lengths (parsed and discarded),
/// and bracket comments. Trailing content after the `;` is ignored.
pub fn parse_newick(text: &str) -> Result<Tree> {
    let bytes = text.as_bytes();
    let mut nodes = vec![Node::default()];
    let mut cur = Tree::ROOT;
    let mut pos = 0usize;
    let mut closed = false;

    while pos < bytes.len() {
        match bytes[pos] {
            b'(' => {
                let child = nodes.len();
                nodes.push(Node { parent: Some(cur), ..Node::default() });
                nodes[cur].children.push(child);
                cur = child;
                pos += 1;
            }
            b',' => {
                let parent = nodes[cur]
                    .parent
                    .ok_or_else(|| anyhow!("unexpected ',' outside a group at byte {pos}"))?;
                let sibling = nodes.len();
                nodes.push(Node { parent: Some(parent), ..Node::default() });
                nodes[parent].children.push(sibling);
                cur = sibling;
                pos += 1;
            }
            b')' => {
                cur = nodes[cur]
                    .parent
                    .ok_or_else(|| anyhow!("unbalanced ')' at byte {pos}"))?;
                pos += 1;
            }
            b':' => {
                // Branch length: consumed, not stored.
                pos += 1;
                while pos < bytes.len() && matches!(bytes[pos], b'0'..=b'9' | b'.' | b'-' | b'+' | b'e' | b'E') {
                    pos += 1;
                }
            }
            b';' => {
                closed = true;
                break;
            }
            b'[' => {
                let end = text[pos..]
                    .find(']')
                    .ok_or_else(|| anyhow!("unterminated comment at byte {pos}"))?;
                pos += end + 1;
            }
            b'\'' => {
                let (label, next) = read_quoted_label(text, pos)?;
                if !nodes[cur].name.is_empty() {
                    return Err(anyhow!("duplicate label at byte {pos}"));
                }
                nodes[cur].name = label;
                pos = next;
            }
            c if c.is_ascii_whitespace() => pos += 1,
            _ => {
                let start = pos;
                while pos < bytes.len() && !matches!(bytes[pos], b'(' | b')' | b',' | b':' | b';' | b'[' | b'\'') && !bytes[pos].is_ascii_whitespace() {
                    pos += 1;
                }
                if !nodes[cur].name.is_empty() {
                    return Err(anyhow!("duplicate label at byte {start}"));
                }
                nodes[cur].name = text[start..pos].to_string();
            }
        }
    }

    if !closed {
        return Err(anyhow!("missing terminating ';'"));
    }
    if cur != Tree::ROOT {
        return Err(anyhow!("unbalanced '(' in tree"));
    }
    Ok(Tree { nodes })
}

// Read a 'quoted label' starting at the opening quote; returns the label
// and the byte offset just past the closing quote. `''` escapes a quote.
fn read_quoted_label(text: &str, start: usize) -> Result<(String, usize)> {
    let bytes = text.as_bytes();
    let mut label = String::new();
    let mut pos = start + 1;
    while pos < bytes.len() {
        if bytes[pos] == b'\'' {
            if bytes.get(pos + 1) == Some(&b'\'') {
                label.push('\'');
                pos += 2;
            } else {
                return Ok((label, pos + 1));
            }
        } else {
            let ch = text[pos..].chars().next().unwrap_or('\u{fffd}');
            label.push(ch);
            pos += ch.len_utf8();
        }
    }
    Err(anyhow!("unterminated quoted label at byte {start}"))
}
