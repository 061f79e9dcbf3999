//---------------------------------------------------------
// maximum matching, Dulmage-Mendelsohn decomposition and
// block triangular form of a (possibly rectangular) pattern.
//---------------------------------------------------------

use crate::sparsity::Sparsity;

/// Block triangular form of a pattern.
///
/// `A(rowperm, colperm)` is block lower triangular with `nb` square or
/// rectangular diagonal blocks: block `b` spans rows
/// `rowblock[b]..rowblock[b+1]` and columns `colblock[b]..colblock[b+1]`
/// of the permuted pattern.
///
/// The coarse boundaries split the permuted rows and columns into the
/// unmatched part, the underdetermined block, the square well-determined
/// block and the overdetermined block.  `coarse_colblock[3]` is the
/// structural rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTriangularForm {
    pub nb: usize,
    pub rowperm: Vec<usize>,
    pub colperm: Vec<usize>,
    pub rowblock: Vec<usize>,
    pub colblock: Vec<usize>,
    pub coarse_rowblock: [usize; 5],
    pub coarse_colblock: [usize; 5],
}

// Dulmage-Mendelsohn decomposition, with A(p,q) block upper triangular
struct DmPerm {
    p: Vec<usize>,
    q: Vec<usize>,
    r: Vec<usize>,
    s: Vec<usize>,
    nb: usize,
    rr: [usize; 5],
    cc: [usize; 5],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Unmatched,
    Set1,
    Set3,
}

// maximum matching: (jmatch, imatch) with jmatch[i] the column matched to
// row i and imatch[j] the row matched to column j
fn maxtrans(a: &Sparsity) -> (Vec<Option<usize>>, Vec<Option<usize>>) {
    let (m, n) = a.size();
    let colind = a.colind();

    // count nonempty rows and columns, and entries on the diagonal
    let mut row_used = vec![false; m];
    let mut n2 = 0;
    let mut k = 0;
    for j in 0..n {
        if colind[j] < colind[j + 1] {
            n2 += 1;
        }
        for &i in &a.row()[colind[j]..colind[j + 1]] {
            row_used[i] = true;
            if i == j {
                k += 1;
            }
        }
    }

    // quick return if the diagonal is zero-free
    if k == m.min(n) {
        let jmatch = (0..m).map(|i| if i < k { Some(i) } else { None }).collect();
        let imatch = (0..n).map(|j| if j < k { Some(j) } else { None }).collect();
        return (jmatch, imatch);
    }

    // match along the shorter dimension
    let m2 = row_used.iter().filter(|&&u| u).count();
    let transposed = m2 < n2;
    let c = if transposed { a.t() } else { a.clone() };

    let (cm, cn) = c.size();
    let mut jmatch = vec![None; cm];
    let mut cheap = c.colind()[..cn].to_vec();
    let mut w = vec![usize::MAX; cn];
    let mut js = vec![0; cn];
    let mut is = vec![0; cn];
    let mut ps = vec![0; cn];
    for k in 0..cn {
        augment(k, &c, &mut jmatch, &mut cheap, &mut w, &mut js, &mut is, &mut ps);
    }

    let mut imatch = vec![None; cn];
    for (i, jm) in jmatch.iter().enumerate() {
        if let Some(j) = *jm {
            imatch[j] = Some(i);
        }
    }

    if transposed {
        (imatch, jmatch)
    } else {
        (jmatch, imatch)
    }
}

// find an augmenting path starting at column k and extend the matching
//allow too_many_arguments since the workspaces are shared across calls
#[allow(clippy::too_many_arguments)]
fn augment(
    k: usize,
    c: &Sparsity,
    jmatch: &mut [Option<usize>],
    cheap: &mut [usize],
    w: &mut [usize],
    js: &mut [usize],
    is: &mut [usize],
    ps: &mut [usize],
) {
    let colind = c.colind();
    let row = c.row();

    let mut found = false;
    let mut head = 0;
    js[0] = k;

    loop {
        let j = js[head];

        // first visit of j for this path: try a cheap assignment
        if w[j] != k {
            w[j] = k;
            let mut p = cheap[j];
            let mut i = 0;
            while p < colind[j + 1] && !found {
                i = row[p];
                found = jmatch[i].is_none();
                p += 1;
            }
            cheap[j] = p;
            if found {
                is[head] = i;
                break;
            }
            ps[head] = colind[j];
        }

        // continue depth first through matched rows
        let end = colind[j + 1];
        let mut p = ps[head];
        while p < end {
            let i = row[p];
            match jmatch[i] {
                Some(jm) if w[jm] != k => {
                    ps[head] = p + 1;
                    is[head] = i;
                    head += 1;
                    js[head] = jm;
                    break;
                }
                _ => p += 1,
            }
        }
        if p == end {
            if head == 0 {
                break;
            }
            head -= 1;
        }
    }

    if found {
        for p in 0..=head {
            jmatch[is[p]] = Some(js[p]);
        }
    }
}

// breadth first search from the unmatched columns, alternating through
// the matching. Rows and columns reached are flagged with `mark`.
fn bfs(
    a: &Sparsity,
    wi: &mut [Mark],
    wj: &mut [Mark],
    queue: &mut Vec<usize>,
    imatch: &[Option<usize>],
    jmatch: &[Option<usize>],
    mark: Mark,
) {
    queue.clear();
    for (j, im) in imatch.iter().enumerate() {
        if im.is_none() {
            wj[j] = Mark::Unmatched;
            queue.push(j);
        }
    }
    if queue.is_empty() {
        return;
    }

    let mut head = 0;
    while head < queue.len() {
        let j = queue[head];
        head += 1;
        for &i in &a.row()[a.colind()[j]..a.colind()[j + 1]] {
            if wi[i] != Mark::Unvisited {
                continue;
            }
            wi[i] = mark;
            if let Some(j2) = jmatch[i] {
                if wj[j2] == Mark::Unvisited {
                    wj[j2] = mark;
                    queue.push(j2);
                }
            }
        }
    }
}

// collect the matched pairs of columns flagged `mark` into coarse set `set`
#[allow(clippy::too_many_arguments)]
fn matched(
    wj: &[Mark],
    imatch: &[Option<usize>],
    p: &mut [usize],
    q: &mut [usize],
    cc: &mut [usize; 5],
    rr: &mut [usize; 5],
    set: usize,
    mark: Mark,
) {
    let mut kc = cc[set];
    let mut kr = rr[set - 1];
    for (j, &wjj) in wj.iter().enumerate() {
        if wjj != mark {
            continue;
        }
        if let Some(i) = imatch[j] {
            p[kr] = i;
            kr += 1;
            q[kc] = j;
            kc += 1;
        }
    }
    cc[set + 1] = kc;
    rr[set] = kr;
}

// collect the unmatched nodes into coarse set `set`
fn unmatched(wi: &[Mark], p: &mut [usize], rr: &mut [usize; 5], set: usize) {
    let mut kr = rr[set];
    for (i, &w) in wi.iter().enumerate() {
        if w == Mark::Unmatched {
            p[kr] = i;
            kr += 1;
        }
    }
    rr[set + 1] = kr;
}

fn dmperm(a: &Sparsity) -> DmPerm {
    let (m, n) = a.size();
    let (jmatch, imatch) = maxtrans(a);

    // coarse decomposition
    let mut wi = vec![Mark::Unvisited; m];
    let mut wj = vec![Mark::Unvisited; n];
    let mut queue = Vec::with_capacity(m.max(n));
    bfs(a, &mut wi, &mut wj, &mut queue, &imatch, &jmatch, Mark::Set1);
    let at = a.t();
    bfs(&at, &mut wj, &mut wi, &mut queue, &jmatch, &imatch, Mark::Set3);

    let mut p = vec![0; m];
    let mut q = vec![0; n];
    let mut rr = [0; 5];
    let mut cc = [0; 5];
    unmatched(&wj, &mut q, &mut cc, 0);
    matched(&wj, &imatch, &mut p, &mut q, &mut cc, &mut rr, 1, Mark::Set1);
    matched(&wj, &imatch, &mut p, &mut q, &mut cc, &mut rr, 2, Mark::Unvisited);
    matched(&wj, &imatch, &mut p, &mut q, &mut cc, &mut rr, 3, Mark::Set3);
    unmatched(&wi, &mut p, &mut rr, 3);

    // fine decomposition of the square block A(R2,C2)
    let mut pinv = vec![0; m];
    for (k, &i) in p.iter().enumerate() {
        pinv[i] = k;
    }
    let nc = cc[3] - cc[2];
    let (r1, r2) = (rr[1], rr[2]);
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    for k in cc[2]..cc[3] {
        let j = q[k];
        for &i in &a.row()[a.colind()[j]..a.colind()[j + 1]] {
            let ip = pinv[i];
            if (r1..r2).contains(&ip) {
                rows.push(ip - r1);
                cols.push(k - cc[2]);
            }
        }
    }
    let (block, _) = Sparsity::triplet_unchecked(nc, nc, &rows, &cols, false);
    let (nb1, ps, rs) = block.scc();

    let qs: Vec<usize> = ps.iter().map(|&k| q[k + cc[2]]).collect();
    q[cc[2]..cc[3]].copy_from_slice(&qs);
    let pps: Vec<usize> = ps.iter().map(|&k| p[k + r1]).collect();
    p[r1..r2].copy_from_slice(&pps);

    // block boundaries: leading coarse block, fine blocks, trailing coarse block
    let mut r = Vec::with_capacity(nb1 + 3);
    let mut s = Vec::with_capacity(nb1 + 3);
    if cc[2] > 0 {
        r.push(0);
        s.push(0);
    }
    for &b in &rs[..nb1] {
        r.push(b + r1);
        s.push(b + cc[2]);
    }
    if r2 < m {
        r.push(r2);
        s.push(cc[3]);
    }
    r.push(m);
    s.push(n);
    let nb = r.len() - 1;

    DmPerm {
        p,
        q,
        r,
        s,
        nb,
        rr,
        cc,
    }
}

impl Sparsity {
    /// Block triangular form (Dulmage-Mendelsohn decomposition).
    pub fn btf(&self) -> BlockTriangularForm {
        let d = dmperm(&self.t());
        log::debug!(
            "btf of {}: {} blocks, structural rank {}",
            self,
            d.nb,
            d.rr[3]
        );
        BlockTriangularForm {
            nb: d.nb,
            rowperm: d.q,
            colperm: d.p,
            rowblock: d.s,
            colblock: d.r,
            coarse_rowblock: d.cc,
            coarse_colblock: d.rr,
        }
    }

    /// Structural rank: size of a maximum matching of rows and columns
    pub fn sprank(&self) -> usize {
        self.btf().coarse_colblock[3]
    }

    /// true if the square pattern is structurally rank deficient
    ///
    /// # Panics
    /// Panics if the pattern is not square.
    pub fn is_singular(&self) -> bool {
        assert!(
            self.is_square(),
            "Sparsity::is_singular: only defined for square patterns, got {}",
            self.dim(false)
        );
        self.sprank() != self.ncol()
    }
}
