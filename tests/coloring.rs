use structsparse::*;

fn coloring_test_patterns() -> Vec<Sparsity> {
    vec![
        Sparsity::dense(3, 4),
        Sparsity::diag(5, 5),
        Sparsity::banded(7, 2),
        Sparsity::lower(5),
        Sparsity::zeros(2, 3),
        // [x ⋅ ⋅ x x ⋅ ]
        // [⋅ x ⋅ ⋅ x ⋅ ]
        // [x ⋅ x ⋅ ⋅ x ]
        Sparsity::triplet(3, 6, &[0, 2, 1, 2, 0, 0, 1, 2], &[0, 0, 1, 2, 3, 4, 4, 5]).unwrap(),
    ]
}

// color of every column, from an ncol x ncolors partition pattern
fn colors_of(sp: &Sparsity, partition: &Sparsity) -> Vec<usize> {
    assert_eq!(partition.nrow(), sp.ncol());
    assert_eq!(partition.nnz(), sp.ncol(), "every column gets exactly one color");
    let mut color = vec![usize::MAX; sp.ncol()];
    for (c, k) in partition.entries() {
        color[c] = k;
    }
    color
}

fn is_unidirectional_coloring(sp: &Sparsity, partition: &Sparsity) -> bool {
    let color = colors_of(sp, partition);
    // no row may see the same color twice
    (0..sp.nrow()).all(|r| {
        let mut seen = vec![false; partition.ncol()];
        sp.entries().filter(|&(rr, _)| rr == r).all(|(_, c)| {
            let fresh = !seen[color[c]];
            seen[color[c]] = true;
            fresh
        })
    })
}

#[test]
fn coloring_unidirectional_valid() {
    for sp in coloring_test_patterns() {
        for ordering in [ColoringOrdering::Natural, ColoringOrdering::LargestFirst] {
            let settings = ColoringSettingsBuilder::default()
                .ordering(ordering)
                .build()
                .unwrap();
            let partition = sp.coloring(&settings);
            assert!(is_unidirectional_coloring(&sp, &partition), "{}", sp);
            assert!(partition.ncol() <= sp.ncol().max(1));
        }
    }
}

#[test]
fn coloring_counts() {
    // a dense block needs one color per column
    assert_eq!(Sparsity::dense(3, 4).uni_coloring(None, usize::MAX).unwrap().ncol(), 4);
    // a diagonal one needs just one
    assert_eq!(Sparsity::diag(5, 5).uni_coloring(None, usize::MAX).unwrap().ncol(), 1);
    // bandwidth two needs five
    assert_eq!(Sparsity::banded(7, 2).uni_coloring(None, usize::MAX).unwrap().ncol(), 5);
}

#[test]
fn coloring_star_symmetric() {
    let sp = Sparsity::banded(7, 2);
    let settings = ColoringSettingsBuilder::default()
        .strategy(ColoringStrategy::Star)
        .build()
        .unwrap();
    let partition = sp.coloring(&settings);
    let color = colors_of(&sp, &partition);
    for (r, c) in sp.entries() {
        if r != c {
            assert_ne!(color[r], color[c]);
        }
    }
}

#[test]
fn coloring_star_hub_symmetric() {
    for sp in [Sparsity::banded(7, 2), Sparsity::dense(3, 3), Sparsity::diag(4, 4)] {
        for ordering in [ColoringOrdering::Natural, ColoringOrdering::LargestFirst] {
            let settings = ColoringSettingsBuilder::default()
                .strategy(ColoringStrategy::StarHub)
                .ordering(ordering)
                .build()
                .unwrap();
            let partition = sp.coloring(&settings);
            let color = colors_of(&sp, &partition);
            for (r, c) in sp.entries() {
                if r != c {
                    assert_ne!(color[r], color[c]);
                }
            }
        }
    }
}

#[test]
fn coloring_cutoff_falls_back() {
    let sp = Sparsity::dense(3, 4);
    let settings = ColoringSettingsBuilder::default().cutoff(2).build().unwrap();
    let partition = sp.coloring(&settings);
    assert!(partition.is_same(&Sparsity::diag(4, 4)));
    assert!(is_unidirectional_coloring(&sp, &partition));
}

#[test]
fn coloring_settings_validation() {
    assert!(ColoringSettingsBuilder::default().cutoff(0).build().is_err());
    let settings = ColoringSettings::default();
    assert_eq!(settings.strategy, ColoringStrategy::Unidirectional);
    assert_eq!(settings.ordering, ColoringOrdering::LargestFirst);
}

#[test]
#[should_panic]
fn coloring_star_requires_square() {
    let settings = ColoringSettingsBuilder::default()
        .strategy(ColoringStrategy::Star)
        .build()
        .unwrap();
    Sparsity::dense(2, 3).coloring(&settings);
}
