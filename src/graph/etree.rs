use crate::sparsity::Sparsity;

/// Parent marker for the roots of an elimination forest.
pub const NO_PARENT: usize = usize::MAX;

impl Sparsity {
    /// Elimination tree of the pattern, or of `AᵀA` if `ata` is set.
    ///
    /// Returns the parent of every column, [`NO_PARENT`] for roots.
    /// Without `ata` only the upper triangular part is referenced.
    pub fn etree(&self, ata: bool) -> Vec<usize> {
        let n = self.ncol();
        let colind = self.colind();
        let row = self.row();

        let mut parent = vec![NO_PARENT; n];
        let mut ancestor = vec![NO_PARENT; n];
        let mut prev = if ata {
            vec![NO_PARENT; self.nrow()]
        } else {
            vec![]
        };

        for k in 0..n {
            for &r in &row[colind[k]..colind[k + 1]] {
                let mut i = if ata { prev[r] } else { r };

                // traverse from i to the root, compressing the path to k
                while i < k {
                    let inext = ancestor[i];
                    ancestor[i] = k;
                    if inext == NO_PARENT {
                        parent[i] = k;
                    }
                    i = inext;
                }
                if ata {
                    prev[r] = k;
                }
            }
        }
        parent
    }
}

/// Postorder of an elimination forest given by its parent array.
///
/// Children are visited in increasing order, and trees in the order of
/// their roots.
pub fn postorder(parent: &[usize]) -> Vec<usize> {
    let n = parent.len();

    // children lists, built backwards so they come out ascending
    let mut head = vec![NO_PARENT; n];
    let mut next = vec![NO_PARENT; n];
    for j in (0..n).rev() {
        let p = parent[j];
        if p != NO_PARENT {
            next[j] = head[p];
            head[p] = j;
        }
    }

    let mut post = Vec::with_capacity(n);
    let mut stack = Vec::with_capacity(n);
    for root in (0..n).filter(|&j| parent[j] == NO_PARENT) {
        stack.push(root);
        while let Some(&p) = stack.last() {
            let i = head[p];
            if i == NO_PARENT {
                stack.pop();
                post.push(p);
            } else {
                head[p] = next[i];
                stack.push(i);
            }
        }
    }
    post
}

#[test]
fn test_etree_arrow() {
    // [x ⋅ ⋅ x ]
    // [⋅ x ⋅ x ]
    // [⋅ ⋅ x x ]
    // [x x x x ]
    let rows = vec![0, 3, 1, 3, 2, 3, 0, 1, 2, 3];
    let sp = Sparsity::new(4, 4, vec![0, 2, 4, 6, 10], rows);
    assert_eq!(sp.etree(false), vec![3, 3, 3, NO_PARENT]);
    assert_eq!(postorder(&sp.etree(false)), vec![0, 1, 2, 3]);
}

#[test]
fn test_etree_chain() {
    // tridiagonal pattern gives a path
    let sp = Sparsity::banded(4, 1);
    let parent = sp.etree(false);
    assert_eq!(parent, vec![1, 2, 3, NO_PARENT]);
    assert_eq!(sp.etree(true), parent);
}

#[test]
fn test_etree_forest() {
    let sp = Sparsity::diag(3, 3);
    assert_eq!(sp.etree(false), vec![NO_PARENT; 3]);
    assert_eq!(postorder(&sp.etree(false)), vec![0, 1, 2]);
}

#[test]
fn test_postorder() {
    //      4
    //    /   \
    //   1     3
    //   |     |
    //   0     2
    let parent = vec![1, 4, 3, 4, NO_PARENT];
    assert_eq!(postorder(&parent), vec![0, 1, 2, 3, 4]);

    let parent = vec![4, 4, 0, NO_PARENT, NO_PARENT];
    assert_eq!(postorder(&parent), vec![3, 2, 0, 1, 4]);
}
