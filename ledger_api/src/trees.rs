use crate::accounts::AccountNode;

/// The forest of accounts returned by the server.  There can be multiple
/// roots (typically one per account category).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountTree {
    roots: Vec<AccountNode>,
}

impl AccountTree {
    pub fn new(roots: Vec<AccountNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[AccountNode] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<AccountNode> {
        self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes, at all levels
    pub fn count(&self) -> usize {
        let mut count = 0;
        self.traverse(|_| count += 1, true);
        count
    }

    /// Depth of the deepest node, where roots are at depth 0.  An empty tree
    /// also has a depth of 0.
    pub fn max_depth(&self) -> usize {
        let mut max_depth = 0;
        self.traverse_with_ancestors(|_, ancestors| {
            max_depth = max_depth.max(ancestors.len());
        });
        max_depth
    }

    /// Recursively traverse all nodes.
    ///
    /// If parent_first is true, then process is first called on the parent
    /// node, then on all the children.  Otherwise the order is reversed.
    pub fn traverse<F>(&self, mut process: F, parent_first: bool)
    where
        F: FnMut(&AccountNode),
    {
        traverse_recursive(&self.roots, &mut process, parent_first);
    }

    /// Depth-first, parent first, traversal.  The callback also receives the
    /// chain of ancestors, starting with the root.
    pub fn traverse_with_ancestors<'a, F>(&'a self, mut process: F)
    where
        F: FnMut(&'a AccountNode, &[&'a AccountNode]),
    {
        let mut ancestors = Vec::new();
        traverse_ancestors_recursive(&self.roots, &mut ancestors, &mut process);
    }
}

fn traverse_recursive<F>(nodes: &[AccountNode], process: &mut F, parent_first: bool)
where
    F: FnMut(&AccountNode),
{
    for node in nodes {
        if parent_first {
            process(node);
        }
        traverse_recursive(&node.children, process, parent_first);
        if !parent_first {
            process(node);
        }
    }
}

fn traverse_ancestors_recursive<'a, F>(
    nodes: &'a [AccountNode],
    ancestors: &mut Vec<&'a AccountNode>,
    process: &mut F,
) where
    F: FnMut(&'a AccountNode, &[&'a AccountNode]),
{
    for node in nodes {
        process(node, ancestors);
        if node.has_children() {
            ancestors.push(node);
            traverse_ancestors_recursive(&node.children, ancestors, process);
            ancestors.pop();
        }
    }
}
