//! Graph colorings for compressed derivative evaluation.
//!
//! A coloring partitions the columns of a pattern into groups that can be
//! seeded together.  The result is returned as a pattern itself: an
//! `ncol x ncolors` pattern whose column `k` lists the columns with color
//! `k`.  Colorings are greedy.  They are valid, not minimal.

mod settings;
mod star;
mod unidirectional;

pub use settings::*;

use crate::sparsity::utils::colcount_to_colind;
use crate::sparsity::Sparsity;
use std::cmp::Reverse;

impl Sparsity {
    /// Column ordering by decreasing number of nonzeros.  Columns with
    /// equal counts keep their natural order.
    pub fn largest_first(&self) -> Vec<usize> {
        let colind = self.colind();
        let mut order: Vec<usize> = (0..self.ncol()).collect();
        order.sort_by_key(|&c| Reverse(colind[c + 1] - colind[c]));
        order
    }

    /// Color the columns with the strategy and ordering in `settings`.
    ///
    /// If the coloring needs more than `settings.cutoff` colors, every
    /// column gets its own color instead.
    ///
    /// # Panics
    /// Panics if a star strategy is requested for a non-square pattern.
    pub fn coloring(&self, settings: &ColoringSettings) -> Sparsity {
        let colored = match settings.strategy {
            ColoringStrategy::Unidirectional => match settings.ordering {
                ColoringOrdering::Natural => self.uni_coloring(None, settings.cutoff),
                ColoringOrdering::LargestFirst => {
                    let ord = self.largest_first();
                    self.pmult_unchecked(&ord, false, true, true)
                        .uni_coloring(None, settings.cutoff)
                        .map(|c| c.pmult_unchecked(&ord, true, false, false))
                }
            },
            ColoringStrategy::Star => self.star_coloring(settings.ordering, settings.cutoff),
            ColoringStrategy::StarHub => self.star_coloring2(settings.ordering, settings.cutoff),
        };

        match colored {
            Some(colors) => {
                log::debug!(
                    "{:?} coloring of {}: {} colors",
                    settings.strategy,
                    self,
                    colors.ncol()
                );
                colors
            }
            None => {
                log::debug!(
                    "{:?} coloring of {} exceeded {} colors, one color per column",
                    settings.strategy,
                    self,
                    settings.cutoff
                );
                Sparsity::diag(self.ncol(), self.ncol())
            }
        }
    }
}

// Partition pattern from a color per column: column k lists, in
// increasing order, the columns of color k.
pub(crate) fn color_partition(color: &[usize], ncolors: usize) -> Sparsity {
    let mut colind = vec![0; ncolors + 1];
    color.iter().for_each(|&k| colind[k + 1] += 1);
    colcount_to_colind(&mut colind);

    let mut next = colind.clone();
    let mut row = vec![0; color.len()];
    for (j, &k) in color.iter().enumerate() {
        row[next[k]] = j;
        next[k] += 1;
    }
    Sparsity::intern(color.len(), ncolors, colind, row)
}
