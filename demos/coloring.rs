use structsparse::*;

fn jacobian_pattern() -> Sparsity {
    // Jacobian of a discretized 1D diffusion with one boundary
    // coupling to a global parameter in the last column
    let n = 8;
    let band = Sparsity::banded(n, 1);
    let parameter = Sparsity::dense(n, 1);
    Sparsity::horzcat(&[band, parameter]).unwrap()
}

fn main() {
    let jac = jacobian_pattern();
    println!("Jacobian pattern {}:", jac);
    jac.spy(&mut std::io::stdout()).unwrap();

    let settings = ColoringSettingsBuilder::default()
        .strategy(ColoringStrategy::Unidirectional)
        .ordering(ColoringOrdering::LargestFirst)
        .build()
        .unwrap();

    let colors = jac.coloring(&settings);
    println!(
        "{} columns compressed into {} directional derivatives",
        jac.ncol(),
        colors.ncol()
    );
    let offsets: Vec<usize> = (0..=colors.ncol()).collect();
    let groups = colors.horzsplit(&offsets).unwrap();
    for (k, group) in groups.iter().enumerate() {
        println!("  seed {}: columns {:?}", k, group.row());
    }

    // Hessian of the same structure
    let hess = Sparsity::banded(8, 2);
    let settings = ColoringSettingsBuilder::default()
        .strategy(ColoringStrategy::Star)
        .build()
        .unwrap();
    let colors = hess.coloring(&settings);
    println!("Hessian pattern {} needs {} star colors", hess, colors.ncol());
}
