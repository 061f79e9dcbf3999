use crate::sparsity::Sparsity;

impl Sparsity {
    /// Depth-first search from column `j` of the column graph, in which
    /// column `c` has an edge to every row index stored in it.
    ///
    /// Visited nodes are flagged in `marked` and written to `xi` in
    /// reverse finishing order, ending just below `top`.  The new top is
    /// returned.  `xi[0..]` doubles as the recursion stack, so `xi` and
    /// `pstack` need room for every node reachable from `j`.  With `pinv`,
    /// node `j` is expanded through column `pinv[j]`, or not at all if
    /// that is `None`.
    pub fn dfs(
        &self,
        j: usize,
        mut top: usize,
        xi: &mut [usize],
        pstack: &mut [usize],
        pinv: Option<&[Option<usize>]>,
        marked: &mut [bool],
    ) -> usize {
        let colind = self.colind();
        let row = self.row();

        let mut head = 0;
        xi[0] = j;
        loop {
            let j = xi[head];
            let jnew = match pinv {
                Some(pinv) => pinv[j],
                None => Some(j),
            };
            if !marked[j] {
                marked[j] = true;
                pstack[head] = jnew.map_or(0, |c| colind[c]);
            }
            let p2 = jnew.map_or(0, |c| colind[c + 1]);

            // descend into the first unmarked neighbor
            let next = (pstack[head]..p2).find(|&p| !marked[row[p]]);
            match next {
                Some(p) => {
                    pstack[head] = p;
                    head += 1;
                    xi[head] = row[p];
                }
                None => {
                    top -= 1;
                    xi[top] = j;
                    if head == 0 {
                        break;
                    }
                    head -= 1;
                }
            }
        }
        top
    }

    /// Strongly connected components of the directed graph of a square
    /// pattern.
    ///
    /// Returns `(nb, p, r)`: the number of components, a permutation
    /// listing the nodes component by component, and the `nb+1` component
    /// boundaries in `p`.
    ///
    /// # Panics
    /// Panics if the pattern is not square.
    pub fn scc(&self) -> (usize, Vec<usize>, Vec<usize>) {
        assert!(
            self.is_square(),
            "Sparsity::scc: pattern must be square, got {}",
            self.dim(false)
        );
        let n = self.ncol();
        let at = self.t();

        let mut xi = vec![0; n];
        let mut pstack = vec![0; n];
        let mut marked = vec![false; n];

        // finishing order on A
        let mut top = n;
        for i in 0..n {
            if !marked[i] {
                top = self.dfs(i, top, &mut xi, &mut pstack, None, &mut marked);
            }
        }

        // components as trees of the dfs on Aᵀ, by decreasing finish time
        marked.fill(false);
        let mut p = vec![0; n];
        let mut r = vec![0; n + 1];
        let mut nb = n;
        top = n;
        for &i in xi.iter() {
            if marked[i] {
                continue;
            }
            r[nb] = top;
            nb -= 1;
            top = at.dfs(i, top, &mut p, &mut pstack, None, &mut marked);
        }
        r[nb] = 0;
        r.copy_within(nb..=n, 0);
        let nb = n - nb;
        r.truncate(nb + 1);

        // sort each component in increasing node order
        let mut blk = vec![0; n];
        for b in 0..nb {
            for &node in &p[r[b]..r[b + 1]] {
                blk[node] = b;
            }
        }
        let mut next = r.clone();
        for i in 0..n {
            p[next[blk[i]]] = i;
            next[blk[i]] += 1;
        }

        (nb, p, r)
    }
}
