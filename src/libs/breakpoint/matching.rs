//! Maximum-weight matching in general graphs.
//!
//! Edmonds' blossom algorithm with Galil's O(n^3) primal-dual bookkeeping.
//! Weights are integers and the dual variables are kept doubled, so every
//! computation is exact.
//!
//! Edge endpoints are numbered `2k` (first vertex of edge `k`) and `2k + 1`
//! (second vertex). Blossoms are numbered `n..2n`; top-level vertices double as
//! trivial blossoms `0..n`.

const NONE: usize = usize::MAX;

/// Maximum-weight matching on vertices `0..n`.
///
/// With `max_cardinality` the result is the heaviest among the matchings of
/// maximum size, negative weights included. Self-loops and edges touching a
/// vertex `>= n` are ignored. Returns the mate of every vertex.
///
/// ```
/// use ragr::libs::breakpoint::matching::max_weight_matching;
///
/// let edges = [(0, 1, 5), (1, 2, 11), (2, 3, 5)];
/// assert_eq!(
///     max_weight_matching(4, &edges, false),
///     vec![None, Some(2), Some(1), None]
/// );
/// assert_eq!(
///     max_weight_matching(4, &edges, true),
///     vec![Some(1), Some(0), Some(3), Some(2)]
/// );
/// ```
pub fn max_weight_matching(
    n: usize,
    edges: &[(usize, usize, i64)],
    max_cardinality: bool,
) -> Vec<Option<usize>> {
    let edges: Vec<(usize, usize, i64)> = edges
        .iter()
        .copied()
        .filter(|&(i, j, _)| i != j && i < n && j < n)
        .collect();
    if edges.is_empty() {
        return vec![None; n];
    }

    let mut matcher = Matcher::new(n, edges, max_cardinality);
    matcher.solve();
    matcher.mates()
}

// Index into a cyclic list; negative positions count from the end
fn at(idx: isize, len: isize) -> usize {
    idx.rem_euclid(len) as usize
}

struct Matcher {
    nvertex: usize,
    edges: Vec<(usize, usize, i64)>,
    max_cardinality: bool,
    /// Vertex of each endpoint
    endpoint: Vec<usize>,
    /// Remote endpoints of the edges incident to each vertex
    neighbend: Vec<Vec<usize>>,
    /// Remote endpoint of the matched edge, per vertex
    mate: Vec<usize>,
    /// 0 free, 1 S, 2 T; bit 4 marks blossoms visited by `scan_blossom`
    label: Vec<u8>,
    /// Endpoint through which a vertex or top-level blossom got its label
    label_end: Vec<usize>,
    /// Top-level blossom containing each vertex
    in_blossom: Vec<usize>,
    blossom_parent: Vec<usize>,
    /// Sub-blossoms in cyclic order, starting with the base
    blossom_children: Vec<Vec<usize>>,
    blossom_base: Vec<usize>,
    /// `blossom_endps[b][i]` connects `blossom_children[b][i]` to child `i + 1`
    blossom_endps: Vec<Vec<usize>>,
    /// Least-slack edge to a different S-blossom
    best_edge: Vec<usize>,
    blossom_best_edges: Vec<Option<Vec<usize>>>,
    unused_blossoms: Vec<usize>,
    /// Twice the vertex duals, then the blossom duals
    dual_var: Vec<i64>,
    /// Edges known to have zero slack
    allow_edge: Vec<bool>,
    /// S-vertices waiting to be scanned
    queue: Vec<usize>,
}

impl Matcher {
    fn new(nvertex: usize, edges: Vec<(usize, usize, i64)>, max_cardinality: bool) -> Self {
        let nedge = edges.len();
        let max_weight = edges.iter().map(|e| e.2).max().unwrap_or(0).max(0);

        let endpoint = (0..2 * nedge)
            .map(|p| {
                let (i, j, _) = edges[p / 2];
                if p % 2 == 0 {
                    i
                } else {
                    j
                }
            })
            .collect();
        let mut neighbend = vec![Vec::new(); nvertex];
        for (k, &(i, j, _)) in edges.iter().enumerate() {
            neighbend[i].push(2 * k + 1);
            neighbend[j].push(2 * k);
        }

        let blossom_base = (0..nvertex)
            .chain(std::iter::repeat(NONE).take(nvertex))
            .collect();
        let dual_var = std::iter::repeat(max_weight)
            .take(nvertex)
            .chain(std::iter::repeat(0).take(nvertex))
            .collect();

        Self {
            nvertex,
            edges,
            max_cardinality,
            endpoint,
            neighbend,
            mate: vec![NONE; nvertex],
            label: vec![0; 2 * nvertex],
            label_end: vec![NONE; 2 * nvertex],
            in_blossom: (0..nvertex).collect(),
            blossom_parent: vec![NONE; 2 * nvertex],
            blossom_children: vec![Vec::new(); 2 * nvertex],
            blossom_base,
            blossom_endps: vec![Vec::new(); 2 * nvertex],
            best_edge: vec![NONE; 2 * nvertex],
            blossom_best_edges: vec![None; 2 * nvertex],
            unused_blossoms: (nvertex..2 * nvertex).collect(),
            dual_var,
            allow_edge: vec![false; nedge],
            queue: Vec::new(),
        }
    }

    fn mates(&self) -> Vec<Option<usize>> {
        self.mate
            .iter()
            .map(|&p| if p == NONE { None } else { Some(self.endpoint[p]) })
            .collect()
    }

    fn slack(&self, k: usize) -> i64 {
        let (i, j, w) = self.edges[k];
        self.dual_var[i] + self.dual_var[j] - 2 * w
    }

    fn blossom_leaves(&self, b: usize) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![b];
        while let Some(t) = stack.pop() {
            if t < self.nvertex {
                leaves.push(t);
            } else {
                stack.extend(self.blossom_children[t].iter().rev());
            }
        }
        leaves
    }

    // Label vertex `w` (and its top-level blossom) `t` through endpoint `p`.
    // A T-blossom passes label S on to the mate of its base.
    fn assign_label(&mut self, w: usize, t: u8, p: usize) {
        let (mut w, mut t, mut p) = (w, t, p);
        loop {
            let b = self.in_blossom[w];
            self.label[w] = t;
            self.label[b] = t;
            self.label_end[w] = p;
            self.label_end[b] = p;
            self.best_edge[w] = NONE;
            self.best_edge[b] = NONE;

            if t == 1 {
                let leaves = self.blossom_leaves(b);
                self.queue.extend(leaves);
                return;
            }

            let mate_end = self.mate[self.blossom_base[b]];
            w = self.endpoint[mate_end];
            t = 1;
            p = mate_end ^ 1;
        }
    }

    // Trace back from `v` and `w` to find a new blossom (returns its base) or
    // an augmenting path (returns NONE).
    fn scan_blossom(&mut self, v: usize, w: usize) -> usize {
        let (mut v, mut w) = (v, w);
        let mut path = Vec::new();
        let mut base = NONE;

        while v != NONE {
            let mut b = self.in_blossom[v];
            if self.label[b] & 4 != 0 {
                base = self.blossom_base[b];
                break;
            }
            path.push(b);
            self.label[b] = 5;

            if self.label_end[b] == NONE {
                // root of the alternating tree
                v = NONE;
            } else {
                v = self.endpoint[self.label_end[b]];
                b = self.in_blossom[v];
                v = self.endpoint[self.label_end[b]];
            }
            if w != NONE {
                std::mem::swap(&mut v, &mut w);
            }
        }

        for b in path {
            self.label[b] = 1;
        }
        base
    }

    // New S-blossom with base `base`, closed by edge `k`
    fn add_blossom(&mut self, base: usize, k: usize) {
        let (v, w, _) = self.edges[k];
        let bb = self.in_blossom[base];
        let mut bv = self.in_blossom[v];
        let mut bw = self.in_blossom[w];

        let b = self
            .unused_blossoms
            .pop()
            .expect("at most n non-trivial blossoms exist at once");
        self.blossom_base[b] = base;
        self.blossom_parent[b] = NONE;
        self.blossom_parent[bb] = b;

        let mut path = Vec::new();
        let mut endps = Vec::new();
        while bv != bb {
            self.blossom_parent[bv] = b;
            path.push(bv);
            endps.push(self.label_end[bv]);
            let next = self.endpoint[self.label_end[bv]];
            bv = self.in_blossom[next];
        }
        path.push(bb);
        path.reverse();
        endps.reverse();
        endps.push(2 * k);
        while bw != bb {
            self.blossom_parent[bw] = b;
            path.push(bw);
            endps.push(self.label_end[bw] ^ 1);
            let next = self.endpoint[self.label_end[bw]];
            bw = self.in_blossom[next];
        }

        self.label[b] = 1;
        self.label_end[b] = self.label_end[bb];
        self.dual_var[b] = 0;
        self.blossom_children[b] = path.clone();
        self.blossom_endps[b] = endps;

        for leaf in self.blossom_leaves(b) {
            if self.label[self.in_blossom[leaf]] == 2 {
                // former T-vertices become S-vertices
                self.queue.push(leaf);
            }
            self.in_blossom[leaf] = b;
        }

        // least-slack edges from the new blossom to neighbouring S-blossoms
        let mut best_edge_to = vec![NONE; 2 * self.nvertex];
        for &sub in &path {
            let lists: Vec<Vec<usize>> = match self.blossom_best_edges[sub].take() {
                Some(list) => vec![list],
                None => self
                    .blossom_leaves(sub)
                    .into_iter()
                    .map(|leaf| self.neighbend[leaf].iter().map(|p| p / 2).collect())
                    .collect(),
            };
            for list in lists {
                for edge in list {
                    let (i, j, _) = self.edges[edge];
                    let j = if self.in_blossom[j] == b { i } else { j };
                    let bj = self.in_blossom[j];
                    if bj != b
                        && self.label[bj] == 1
                        && (best_edge_to[bj] == NONE
                            || self.slack(edge) < self.slack(best_edge_to[bj]))
                    {
                        best_edge_to[bj] = edge;
                    }
                }
            }
            self.best_edge[sub] = NONE;
        }

        let best: Vec<usize> = best_edge_to.into_iter().filter(|&e| e != NONE).collect();
        self.best_edge[b] = NONE;
        for &edge in &best {
            if self.best_edge[b] == NONE || self.slack(edge) < self.slack(self.best_edge[b]) {
                self.best_edge[b] = edge;
            }
        }
        self.blossom_best_edges[b] = Some(best);
    }

    // Dissolve blossom `b`. Outside the end stage a T-blossom relabels its
    // sub-blossoms along the even path from the entry child to the base.
    fn expand_blossom(&mut self, b: usize, end_stage: bool) {
        let children = self.blossom_children[b].clone();
        for &s in &children {
            self.blossom_parent[s] = NONE;
            if s < self.nvertex {
                self.in_blossom[s] = s;
            } else if end_stage && self.dual_var[s] == 0 {
                self.expand_blossom(s, end_stage);
            } else {
                for leaf in self.blossom_leaves(s) {
                    self.in_blossom[leaf] = s;
                }
            }
        }

        if !end_stage && self.label[b] == 2 {
            let endps = self.blossom_endps[b].clone();
            let len = children.len() as isize;
            let entry_child = self.in_blossom[self.endpoint[self.label_end[b] ^ 1]];
            let mut j = children
                .iter()
                .position(|&c| c == entry_child)
                .unwrap_or(0) as isize;
            let (jstep, endptrick) = if j & 1 == 1 {
                j -= len;
                (1isize, 0usize)
            } else {
                (-1isize, 1usize)
            };

            let mut p = self.label_end[b];
            while j != 0 {
                // relabel the T-sub-blossom
                let tv = self.endpoint[p ^ 1];
                self.label[tv] = 0;
                let q = endps[at(j - endptrick as isize, len)] ^ endptrick ^ 1;
                let qv = self.endpoint[q];
                self.label[qv] = 0;
                self.assign_label(tv, 2, p);

                // step to the next S-sub-blossom
                self.allow_edge[endps[at(j - endptrick as isize, len)] / 2] = true;
                j += jstep;
                p = endps[at(j - endptrick as isize, len)] ^ endptrick;
                // and on to the next T-sub-blossom
                self.allow_edge[p / 2] = true;
                j += jstep;
            }

            // the base T-sub-blossom keeps its mate
            let bv = children[at(j, len)];
            let tv = self.endpoint[p ^ 1];
            self.label[tv] = 2;
            self.label[bv] = 2;
            self.label_end[tv] = p;
            self.label_end[bv] = p;
            self.best_edge[bv] = NONE;

            j += jstep;
            while children[at(j, len)] != entry_child {
                let bv = children[at(j, len)];
                if self.label[bv] == 1 {
                    j += jstep;
                    continue;
                }
                let reached = self
                    .blossom_leaves(bv)
                    .into_iter()
                    .find(|&leaf| self.label[leaf] != 0);
                if let Some(leaf) = reached {
                    self.label[leaf] = 0;
                    let base_mate = self.endpoint[self.mate[self.blossom_base[bv]]];
                    self.label[base_mate] = 0;
                    let end = self.label_end[leaf];
                    self.assign_label(leaf, 2, end);
                }
                j += jstep;
            }
        }

        self.label[b] = 0;
        self.label_end[b] = NONE;
        self.blossom_children[b].clear();
        self.blossom_endps[b].clear();
        self.blossom_base[b] = NONE;
        self.blossom_best_edges[b] = None;
        self.best_edge[b] = NONE;
        self.unused_blossoms.push(b);
    }

    // Swap matched and unmatched edges along the even path from vertex `v`
    // to the base of blossom `b`, then rotate `b` so `v` becomes its base.
    fn augment_blossom(&mut self, b: usize, v: usize) {
        let mut t = v;
        while self.blossom_parent[t] != b {
            t = self.blossom_parent[t];
        }
        if t >= self.nvertex {
            self.augment_blossom(t, v);
        }

        let children = self.blossom_children[b].clone();
        let endps = self.blossom_endps[b].clone();
        let len = children.len() as isize;
        let i = children.iter().position(|&c| c == t).unwrap_or(0);
        let mut j = i as isize;
        let (jstep, endptrick) = if i & 1 == 1 {
            j -= len;
            (1isize, 0usize)
        } else {
            (-1isize, 1usize)
        };

        while j != 0 {
            j += jstep;
            let t = children[at(j, len)];
            let p = endps[at(j - endptrick as isize, len)] ^ endptrick;
            if t >= self.nvertex {
                self.augment_blossom(t, self.endpoint[p]);
            }
            j += jstep;
            let t = children[at(j, len)];
            if t >= self.nvertex {
                self.augment_blossom(t, self.endpoint[p ^ 1]);
            }
            let (u, w) = (self.endpoint[p], self.endpoint[p ^ 1]);
            self.mate[u] = p ^ 1;
            self.mate[w] = p;
        }

        self.blossom_children[b].rotate_left(i);
        self.blossom_endps[b].rotate_left(i);
        let first = self.blossom_children[b][0];
        self.blossom_base[b] = self.blossom_base[first];
    }

    // Augment along the path through edge `k` between two S-vertices
    fn augment_matching(&mut self, k: usize) {
        let (v, w, _) = self.edges[k];
        for (s, p) in [(v, 2 * k + 1), (w, 2 * k)] {
            let (mut s, mut p) = (s, p);
            loop {
                let bs = self.in_blossom[s];
                if bs >= self.nvertex {
                    self.augment_blossom(bs, s);
                }
                self.mate[s] = p;
                if self.label_end[bs] == NONE {
                    // reached a single vertex
                    break;
                }

                let t = self.endpoint[self.label_end[bs]];
                let bt = self.in_blossom[t];
                s = self.endpoint[self.label_end[bt]];
                let j = self.endpoint[self.label_end[bt] ^ 1];
                if bt >= self.nvertex {
                    self.augment_blossom(bt, j);
                }
                self.mate[j] = self.label_end[bt];
                p = self.label_end[bt] ^ 1;
            }
        }
    }

    fn min_vertex_dual(&self) -> i64 {
        self.dual_var[..self.nvertex]
            .iter()
            .copied()
            .min()
            .unwrap_or(0)
    }

    fn solve(&mut self) {
        let n = self.nvertex;

        // each stage augments the matching by one edge, or stops
        for _ in 0..n {
            self.label.fill(0);
            self.best_edge.fill(NONE);
            for b in n..2 * n {
                self.blossom_best_edges[b] = None;
            }
            self.allow_edge.fill(false);
            self.queue.clear();

            for v in 0..n {
                if self.mate[v] == NONE && self.label[self.in_blossom[v]] == 0 {
                    self.assign_label(v, 1, NONE);
                }
            }

            let mut augmented = false;
            loop {
                while !augmented {
                    let Some(v) = self.queue.pop() else {
                        break;
                    };

                    for idx in 0..self.neighbend[v].len() {
                        let p = self.neighbend[v][idx];
                        let k = p / 2;
                        let w = self.endpoint[p];
                        if self.in_blossom[v] == self.in_blossom[w] {
                            continue;
                        }

                        let mut kslack = 0;
                        if !self.allow_edge[k] {
                            kslack = self.slack(k);
                            if kslack <= 0 {
                                self.allow_edge[k] = true;
                            }
                        }

                        if self.allow_edge[k] {
                            let bw_label = self.label[self.in_blossom[w]];
                            if bw_label == 0 {
                                // w is free and its mate joins the tree
                                self.assign_label(w, 2, p ^ 1);
                            } else if bw_label == 1 {
                                let base = self.scan_blossom(v, w);
                                if base != NONE {
                                    self.add_blossom(base, k);
                                } else {
                                    self.augment_matching(k);
                                    augmented = true;
                                    break;
                                }
                            } else if self.label[w] == 0 {
                                // w sits inside a T-blossom but was not reached yet
                                self.label[w] = 2;
                                self.label_end[w] = p ^ 1;
                            }
                        } else if self.label[self.in_blossom[w]] == 1 {
                            let b = self.in_blossom[v];
                            if self.best_edge[b] == NONE || kslack < self.slack(self.best_edge[b]) {
                                self.best_edge[b] = k;
                            }
                        } else if self.label[w] == 0
                            && (self.best_edge[w] == NONE
                                || kslack < self.slack(self.best_edge[w]))
                        {
                            self.best_edge[w] = k;
                        }
                    }
                }

                if augmented {
                    break;
                }

                // no progress possible with tight edges: adjust the duals
                let mut delta_type = 0u8;
                let mut delta = 0i64;
                let mut delta_edge = NONE;
                let mut delta_blossom = NONE;

                if !self.max_cardinality {
                    delta_type = 1;
                    delta = self.min_vertex_dual();
                }

                for v in 0..n {
                    if self.label[self.in_blossom[v]] == 0 && self.best_edge[v] != NONE {
                        let d = self.slack(self.best_edge[v]);
                        if delta_type == 0 || d < delta {
                            delta = d;
                            delta_type = 2;
                            delta_edge = self.best_edge[v];
                        }
                    }
                }

                for b in 0..2 * n {
                    if self.blossom_parent[b] == NONE
                        && self.label[b] == 1
                        && self.best_edge[b] != NONE
                    {
                        // S-S slack is always even
                        let d = self.slack(self.best_edge[b]) / 2;
                        if delta_type == 0 || d < delta {
                            delta = d;
                            delta_type = 3;
                            delta_edge = self.best_edge[b];
                        }
                    }
                }

                for b in n..2 * n {
                    if self.blossom_base[b] != NONE
                        && self.blossom_parent[b] == NONE
                        && self.label[b] == 2
                        && (delta_type == 0 || self.dual_var[b] < delta)
                    {
                        delta = self.dual_var[b];
                        delta_type = 4;
                        delta_blossom = b;
                    }
                }

                if delta_type == 0 {
                    // max cardinality reached; one last update for optimality
                    delta_type = 1;
                    delta = self.min_vertex_dual().max(0);
                }

                for v in 0..n {
                    match self.label[self.in_blossom[v]] {
                        1 => self.dual_var[v] -= delta,
                        2 => self.dual_var[v] += delta,
                        _ => {}
                    }
                }
                for b in n..2 * n {
                    if self.blossom_base[b] != NONE && self.blossom_parent[b] == NONE {
                        match self.label[b] {
                            1 => self.dual_var[b] += delta,
                            2 => self.dual_var[b] -= delta,
                            _ => {}
                        }
                    }
                }

                match delta_type {
                    1 => break,
                    2 => {
                        self.allow_edge[delta_edge] = true;
                        let (i, j, _) = self.edges[delta_edge];
                        let i = if self.label[self.in_blossom[i]] == 0 { j } else { i };
                        self.queue.push(i);
                    }
                    3 => {
                        self.allow_edge[delta_edge] = true;
                        let (i, _, _) = self.edges[delta_edge];
                        self.queue.push(i);
                    }
                    _ => self.expand_blossom(delta_blossom, false),
                }
            }

            if !augmented {
                break;
            }

            // S-blossoms with zero dual are expanded between stages
            for b in n..2 * n {
                if self.blossom_parent[b] == NONE
                    && self.blossom_base[b] != NONE
                    && self.label[b] == 1
                    && self.dual_var[b] == 0
                {
                    self.expand_blossom(b, true);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // expected mates, -1 for unmatched
    fn check(edges: &[(usize, usize, i64)], max_cardinality: bool, expected: &[i64]) {
        let n = expected.len();
        let mates = max_weight_matching(n, edges, max_cardinality);
        let mates: Vec<i64> = mates
            .into_iter()
            .map(|m| m.map(|v| v as i64).unwrap_or(-1))
            .collect();
        assert_eq!(mates, expected);
    }

    fn weight_of(edges: &[(usize, usize, i64)], mates: &[Option<usize>]) -> (usize, i64) {
        let mut size = 0;
        let mut total = 0;
        for &(i, j, w) in edges {
            if mates[i] == Some(j) {
                size += 1;
                total += w;
            }
        }
        (size, total)
    }

    // exhaustive search over all matchings
    fn brute_force(n: usize, edges: &[(usize, usize, i64)], max_cardinality: bool) -> (usize, i64) {
        fn go(
            k: usize,
            edges: &[(usize, usize, i64)],
            used: &mut Vec<bool>,
            size: usize,
            total: i64,
            max_cardinality: bool,
            best: &mut (usize, i64),
        ) {
            if k == edges.len() {
                let better = if max_cardinality {
                    (size, total) > *best
                } else {
                    total > best.1
                };
                if better {
                    *best = (size, total);
                }
                return;
            }
            go(k + 1, edges, used, size, total, max_cardinality, best);
            let (i, j, w) = edges[k];
            if !used[i] && !used[j] {
                used[i] = true;
                used[j] = true;
                go(k + 1, edges, used, size + 1, total + w, max_cardinality, best);
                used[i] = false;
                used[j] = false;
            }
        }

        let mut best = (0, 0);
        go(0, edges, &mut vec![false; n], 0, 0, max_cardinality, &mut best);
        best
    }

    #[test]
    fn test_trivial() {
        assert_eq!(max_weight_matching(0, &[], false), Vec::<Option<usize>>::new());
        assert_eq!(max_weight_matching(3, &[], true), vec![None; 3]);
        check(&[(0, 1, 1)], false, &[1, 0]);
        check(&[(1, 2, 10), (2, 3, 11)], false, &[-1, -1, 3, 2]);
        check(&[(1, 2, 5), (2, 3, 11), (3, 4, 5)], false, &[-1, -1, 3, 2, -1]);
        check(&[(1, 2, 5), (2, 3, 11), (3, 4, 5)], true, &[-1, 2, 1, 4, 3]);
        // loops are ignored
        assert_eq!(max_weight_matching(2, &[(1, 1, 5)], false), vec![None, None]);
    }

    #[test]
    fn test_negative_weights() {
        let edges = [(1, 2, 2), (1, 3, -2), (2, 3, 1), (2, 4, -1), (3, 4, -6)];
        check(&edges, false, &[-1, 2, 1, -1, -1]);
        check(&edges, true, &[-1, 3, 4, 1, 2]);
    }

    #[test]
    fn test_s_blossom() {
        check(
            &[(1, 2, 8), (1, 3, 9), (2, 3, 10), (3, 4, 7)],
            false,
            &[-1, 2, 1, 4, 3],
        );
        check(
            &[(1, 2, 8), (1, 3, 9), (2, 3, 10), (3, 4, 7), (1, 6, 5), (4, 5, 6)],
            false,
            &[-1, 6, 3, 2, 5, 4, 1],
        );
    }

    #[test]
    fn test_t_blossom() {
        check(
            &[(1, 2, 9), (1, 3, 8), (2, 3, 10), (1, 4, 5), (4, 5, 4), (1, 6, 3)],
            false,
            &[-1, 6, 3, 2, 5, 4, 1],
        );
        check(
            &[(1, 2, 9), (1, 3, 8), (2, 3, 10), (1, 4, 5), (4, 5, 3), (1, 6, 4)],
            false,
            &[-1, 6, 3, 2, 5, 4, 1],
        );
        check(
            &[(1, 2, 9), (1, 3, 8), (2, 3, 10), (1, 4, 5), (4, 5, 3), (3, 6, 4)],
            false,
            &[-1, 2, 1, 6, 5, 4, 3],
        );
    }

    #[test]
    fn test_nested_blossoms() {
        check(
            &[(1, 2, 9), (1, 3, 9), (2, 3, 10), (2, 4, 8), (3, 5, 8), (4, 5, 10), (5, 6, 6)],
            false,
            &[-1, 3, 4, 1, 2, 6, 5],
        );
        check(
            &[
                (1, 2, 10),
                (1, 7, 10),
                (2, 3, 12),
                (3, 4, 20),
                (3, 5, 20),
                (4, 5, 25),
                (5, 6, 10),
                (6, 7, 10),
                (7, 8, 8),
            ],
            false,
            &[-1, 2, 1, 4, 3, 6, 5, 8, 7],
        );
        check(
            &[
                (1, 2, 8),
                (1, 3, 8),
                (2, 3, 10),
                (2, 4, 12),
                (3, 5, 12),
                (4, 5, 14),
                (4, 6, 12),
                (5, 7, 12),
                (6, 7, 14),
                (7, 8, 12),
            ],
            false,
            &[-1, 2, 1, 5, 6, 3, 4, 8, 7],
        );
    }

    #[test]
    fn test_expand_t_blossom() {
        check(
            &[
                (1, 2, 45),
                (1, 5, 45),
                (2, 3, 50),
                (3, 4, 45),
                (4, 5, 50),
                (1, 6, 30),
                (3, 9, 35),
                (4, 8, 35),
                (5, 7, 26),
                (9, 10, 5),
            ],
            false,
            &[-1, 6, 3, 2, 8, 7, 1, 5, 4, 10, 9],
        );
    }

    #[test]
    fn test_against_brute_force() {
        // deterministic pseudo-random graphs
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |bound: u64| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed % bound
        };

        for round in 0..200 {
            let n = 2 + next(7) as usize;
            let mut edges = Vec::new();
            for i in 0..n {
                for j in (i + 1)..n {
                    if next(100) < 55 {
                        edges.push((i, j, next(21) as i64 - 6));
                    }
                }
            }

            for max_cardinality in [false, true] {
                let mates = max_weight_matching(n, &edges, max_cardinality);
                for (v, m) in mates.iter().enumerate() {
                    if let Some(u) = m {
                        assert_eq!(mates[*u], Some(v), "round {}", round);
                    }
                }

                let found = weight_of(&edges, &mates);
                let best = brute_force(n, &edges, max_cardinality);
                if max_cardinality {
                    assert_eq!(found, best, "round {}: {:?}", round, edges);
                } else {
                    assert_eq!(found.1, best.1, "round {}: {:?}", round, edges);
                }
            }
        }
    }
}
