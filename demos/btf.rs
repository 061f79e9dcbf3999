use structsparse::*;

fn main() {
    // [x ⋅ ⋅ ⋅ x ]
    // [x x ⋅ ⋅ ⋅ ]
    // [⋅ ⋅ x x ⋅ ]
    // [⋅ ⋅ x x ⋅ ]
    // [x ⋅ ⋅ ⋅ x ]
    let sp = Sparsity::triplet(
        5,
        5,
        &[0, 1, 4, 1, 2, 3, 2, 3, 0, 4],
        &[0, 0, 0, 1, 2, 2, 3, 3, 4, 4],
    )
    .unwrap();

    println!("pattern {}:", sp);
    sp.spy(&mut std::io::stdout()).unwrap();

    let f = sp.btf();
    println!("structural rank {}, {} diagonal blocks", sp.sprank(), f.nb);

    let permuted = sp
        .pmult(&f.rowperm, true, false, true)
        .unwrap()
        .pmult(&f.colperm, false, true, true)
        .unwrap();
    println!("block triangular form:");
    permuted.spy(&mut std::io::stdout()).unwrap();

    for b in 0..f.nb {
        println!(
            "  block {}: rows {:?} columns {:?}",
            b,
            &f.rowperm[f.rowblock[b]..f.rowblock[b + 1]],
            &f.colperm[f.colblock[b]..f.colblock[b + 1]]
        );
    }

    let perm = sp.amd().unwrap();
    println!("amd ordering of the symmetric part: {:?}", perm);
}
