use super::{color_partition, ColoringOrdering};
use crate::sparsity::Sparsity;

const UNCOLORED: usize = usize::MAX;

impl Sparsity {
    /// Greedy star coloring of a symmetric pattern.
    ///
    /// Adjacent vertices get different colors and every path on four
    /// vertices uses at least three colors, so a symmetric matrix can be
    /// recovered from one product per color.  This is Algorithm 4.1 of
    /// Gebremedhin, Manne and Pothen, "What color is your Jacobian?"
    /// (SIAM Review, 2005).  Returns `None` once more than `cutoff`
    /// colors are needed.
    ///
    /// # Panics
    /// Panics if the pattern is not square.
    pub fn star_coloring(&self, ordering: ColoringOrdering, cutoff: usize) -> Option<Sparsity> {
        assert!(
            self.is_square(),
            "Sparsity::star_coloring: pattern must be square, got {}",
            self.dim(false)
        );

        if ordering == ColoringOrdering::LargestFirst {
            let ord = self.largest_first();
            let permuted = self.pmult_unchecked(&ord, true, true, true);
            return permuted
                .star_coloring(ColoringOrdering::Natural, cutoff)
                .map(|c| c.pmult_unchecked(&ord, true, false, false));
        }

        let n = self.ncol();
        let colind = self.colind();
        let row = self.row();
        let neighbors = |v: usize| &row[colind[v]..colind[v + 1]];

        // forbidden[k] == v marks color k as taken for vertex v
        let mut forbidden: Vec<usize> = Vec::with_capacity(n);
        let mut color = vec![UNCOLORED; n];

        for v in 0..n {
            for &w in neighbors(v) {
                if color[w] != UNCOLORED {
                    forbidden[color[w]] = v;
                }

                for &x in neighbors(w) {
                    if color[x] == UNCOLORED {
                        continue;
                    }
                    if color[w] == UNCOLORED {
                        forbidden[color[x]] = v;
                    } else if neighbors(x)
                        .iter()
                        .any(|&y| y != w && color[y] != UNCOLORED && color[y] == color[w])
                    {
                        // x-w would close a two-colored path
                        forbidden[color[x]] = v;
                    }
                }
            }

            let k = forbidden
                .iter()
                .position(|&f| f != v)
                .unwrap_or(forbidden.len());
            color[v] = k;
            if k == forbidden.len() {
                forbidden.push(UNCOLORED);
                if forbidden.len() > cutoff {
                    return None;
                }
            }
        }

        Some(color_partition(&color, forbidden.len()))
    }

    /// Star coloring that tracks the two-colored stars explicitly.
    ///
    /// Every edge between two colored vertices belongs to a star whose
    /// hub, once known, is recorded.  A candidate color is then rejected
    /// by looking at hubs and at the first equally colored neighbor
    /// instead of at every path of length three, following Algorithm 4.1
    /// of Gebremedhin, Tarafdar, Manne and Pothen, "New acyclic and star
    /// coloring algorithms with application to computing Hessians" (SIAM
    /// J. Sci. Comput., 2007).  A pattern that is not symmetric is colored
    /// through its symmetric hull.  Returns `None` once more than `cutoff`
    /// colors are needed.
    ///
    /// # Panics
    /// Panics if the pattern is not square.
    pub fn star_coloring2(&self, ordering: ColoringOrdering, cutoff: usize) -> Option<Sparsity> {
        assert!(
            self.is_square(),
            "Sparsity::star_coloring2: pattern must be square, got {}",
            self.dim(false)
        );

        if !self.is_symmetric() {
            return (self + &self.t()).star_coloring2(ordering, cutoff);
        }

        if ordering == ColoringOrdering::LargestFirst {
            let ord = self.largest_first();
            let permuted = self.pmult_unchecked(&ord, true, true, true);
            return permuted
                .star_coloring2(ColoringOrdering::Natural, cutoff)
                .map(|c| c.pmult_unchecked(&ord, true, false, false));
        }

        let n = self.ncol();
        let colind = self.colind();
        let row = self.row();

        // offset of the mirrored entry (c,r) for every nonzero (r,c)
        let (_, mirror) = self.transpose();

        let mut color = vec![UNCOLORED; n];
        // forbidden[k] == v marks color k as taken for vertex v
        let mut forbidden: Vec<usize> = Vec::with_capacity(n);
        // first edge (v, w) seen with color[w] == k while coloring v, and
        // its offset in column v
        let mut first_neighbor: Vec<(usize, usize, usize)> = Vec::with_capacity(n);
        let mut treated = vec![UNCOLORED; n];
        // star of every edge between colored vertices, and hub of every star
        let mut star = vec![UNCOLORED; self.nnz()];
        let mut hub: Vec<usize> = Vec::new();

        // forbid the colors of all colored neighbors of w other than v
        let forbid_around = |v: usize, w: usize, color: &[usize], forbidden: &mut [usize]| {
            for &x in &row[colind[w]..colind[w + 1]] {
                if x != v && x != w && color[x] != UNCOLORED {
                    forbidden[color[x]] = v;
                }
            }
        };

        for v in 0..n {
            for kw in colind[v]..colind[v + 1] {
                let w = row[kw];
                if w == v || color[w] == UNCOLORED {
                    continue;
                }
                let cw = color[w];
                forbidden[cw] = v;

                let (p, q, _) = first_neighbor[cw];
                if p == v {
                    // v already has a neighbor q colored like w
                    if treated[q] != v {
                        forbid_around(v, q, &color, &mut forbidden);
                        treated[q] = v;
                    }
                    forbid_around(v, w, &color, &mut forbidden);
                    treated[w] = v;
                } else {
                    first_neighbor[cw] = (v, w, kw);
                    for kx in colind[w]..colind[w + 1] {
                        let x = row[kx];
                        if x == v || x == w || color[x] == UNCOLORED {
                            continue;
                        }
                        // x is the center of a star through w
                        if hub[star[kx]] == x {
                            forbidden[color[x]] = v;
                        }
                    }
                }
            }

            let k = forbidden
                .iter()
                .position(|&f| f != v)
                .unwrap_or(forbidden.len());
            color[v] = k;
            if k == forbidden.len() {
                forbidden.push(UNCOLORED);
                first_neighbor.push((UNCOLORED, UNCOLORED, UNCOLORED));
                if forbidden.len() > cutoff {
                    return None;
                }
            }

            // place every new edge v-w into a star
            for kw in colind[v]..colind[v + 1] {
                let w = row[kw];
                if w == v || color[w] == UNCOLORED {
                    continue;
                }
                let through_w = (colind[w]..colind[w + 1]).find(|&kx| {
                    let x = row[kx];
                    x != v && x != w && color[x] == k
                });
                let s = match through_w {
                    // w has two neighbors colored k and becomes a hub
                    Some(kx) => {
                        hub[star[kx]] = w;
                        star[kx]
                    }
                    None => match first_neighbor[color[w]] {
                        // v has two neighbors colored like w and becomes a hub
                        (p, q, kq) if p == v && q != w => {
                            hub[star[kq]] = v;
                            star[kq]
                        }
                        _ => {
                            hub.push(UNCOLORED);
                            hub.len() - 1
                        }
                    },
                };
                star[kw] = s;
                star[mirror[kw]] = s;
            }
        }

        Some(color_partition(&color, forbidden.len()))
    }
}
