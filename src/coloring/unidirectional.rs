use super::color_partition;
use crate::sparsity::Sparsity;

impl Sparsity {
    /// Greedy distance-2 coloring of the columns in natural order.
    ///
    /// Two columns get different colors whenever they share a row, so all
    /// columns of one color can be seeded in a single directional
    /// derivative.  `at` is the transpose of `self` if the caller already
    /// has it.  Returns `None` once more than `cutoff` colors are needed.
    pub fn uni_coloring(&self, at: Option<&Sparsity>, cutoff: usize) -> Option<Sparsity> {
        let transposed;
        let at = match at {
            Some(at) => at,
            None => {
                transposed = self.t();
                &transposed
            }
        };
        debug_assert!(self.is_transpose(at));

        let colind = self.colind();
        let row = self.row();
        let at_colind = at.colind();
        let at_row = at.row();

        // forbidden[k] == i marks color k as taken for column i
        let mut forbidden: Vec<usize> = Vec::with_capacity(self.ncol());
        let mut color = vec![0; self.ncol()];

        for i in 0..self.ncol() {
            for &r in &row[colind[i]..colind[i + 1]] {
                // earlier columns with an entry in row r
                for &i_prev in &at_row[at_colind[r]..at_colind[r + 1]] {
                    if i_prev >= i {
                        break;
                    }
                    forbidden[color[i_prev]] = i;
                }
            }

            let k = forbidden
                .iter()
                .position(|&f| f != i)
                .unwrap_or(forbidden.len());
            color[i] = k;
            if k == forbidden.len() {
                forbidden.push(usize::MAX);
                if forbidden.len() > cutoff {
                    return None;
                }
            }
        }

        Some(color_partition(&color, forbidden.len()))
    }
}
