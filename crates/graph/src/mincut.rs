use crate::rng::SeededRng;
use crate::types::{Edge, Graph, MinCutResult, NodeId, PartitionPairEdges};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Exact global two-way minimum cut (Stoer–Wagner).
///
/// Deterministic: no randomness, iteration follows `graph.nodes` order,
/// so identical graphs always yield identical partitions. Runs in
/// O(V·E + V²·log V). Degenerate graphs (0–1 nodes) return a single
/// partition with zero cut weight.
#[must_use]
pub fn stoer_wagner(graph: &Graph) -> MinCutResult {
    let n = graph.node_count();
    if n <= 1 {
        return MinCutResult::single(graph.nodes.clone());
    }

    // Dense working copy over node indices. Parallel edges are summed
    // while loading — a caller-side policy; contract() keeps them apart.
    let index: HashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.as_str(), i))
        .collect();
    let mut weights = vec![vec![0.0f64; n]; n];
    for edge in &graph.edges {
        let i = index[edge.source.as_str()];
        let j = index[edge.target.as_str()];
        weights[i][j] += f64::from(edge.weight);
        weights[j][i] += f64::from(edge.weight);
    }

    let mut active: Vec<usize> = (0..n).collect();
    let mut merged: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    let mut best_weight = f64::MAX;
    let mut best_side: Vec<usize> = Vec::new();

    while active.len() > 1 {
        let (s_pos, t_pos, cut_of_phase) = minimum_cut_phase(&active, &weights);
        let s = active[s_pos];
        let t = active[t_pos];

        // The cut-of-the-phase isolates everything merged into t so far.
        if cut_of_phase < best_weight {
            best_weight = cut_of_phase;
            best_side = merged[t].clone();
        }

        // Merge t into s for the next phase.
        for &v in &active {
            if v != s && v != t {
                weights[s][v] += weights[t][v];
                weights[v][s] += weights[v][t];
            }
        }
        let absorbed = std::mem::take(&mut merged[t]);
        merged[s].extend(absorbed);
        active.remove(t_pos);
    }

    let side: HashSet<usize> = best_side.into_iter().collect();
    let isolated: Vec<NodeId> = graph
        .nodes
        .iter()
        .enumerate()
        .filter(|(i, _)| side.contains(i))
        .map(|(_, node)| node.clone())
        .collect();
    let remainder: Vec<NodeId> = graph
        .nodes
        .iter()
        .enumerate()
        .filter(|(i, _)| !side.contains(i))
        .map(|(_, node)| node.clone())
        .collect();

    result_for_partitions(graph, vec![isolated, remainder])
}

/// One maximum-adjacency-search phase.
///
/// Starting from the first active vertex, repeatedly adds the vertex most
/// strongly connected to the already-added set. Returns the positions (in
/// `active`) of the last two vertices added and the weight of the cut
/// isolating the very last one.
fn minimum_cut_phase(active: &[usize], weights: &[Vec<f64>]) -> (usize, usize, f64) {
    let n = weights.len();
    let mut in_set = vec![false; n];
    let mut connection = vec![0.0f64; n];
    let mut last = 0usize;
    let mut before_last = 0usize;

    for _ in 0..active.len() {
        let mut best_pos: Option<usize> = None;
        let mut best_connection = -1.0f64;
        for (pos, &v) in active.iter().enumerate() {
            if !in_set[v] && (best_pos.is_none() || connection[v] > best_connection) {
                best_connection = connection[v];
                best_pos = Some(pos);
            }
        }
        let pos = best_pos.expect("phase always has an unvisited vertex");
        let v = active[pos];
        in_set[v] = true;
        before_last = last;
        last = pos;

        for &u in active {
            if !in_set[u] {
                connection[u] += weights[v][u];
            }
        }
    }

    (before_last, last, connection[active[last]])
}

/// Single-pass randomized contraction cut (Karger).
///
/// Uniformly picks an edge and contracts it until two super-nodes remain;
/// the surviving edges form the candidate cut. Because [`Graph::contract`]
/// keeps parallel edges, uniform edge picking weights merge probability
/// correctly. This is a fast heuristic, not a verified minimum: one pass
/// finds the minimum cut only with probability Ω(1/V²), and no trial
/// amplification is performed here. On a disconnected graph the pass may
/// run out of edges early and return one partition per remaining
/// super-node.
#[must_use]
pub fn karger_cut(graph: &Graph, rng: &mut SeededRng) -> MinCutResult {
    if graph.node_count() <= 1 {
        return MinCutResult::single(graph.nodes.clone());
    }

    let mut working = graph.clone();
    while working.node_count() > 2 && !working.edges.is_empty() {
        let picked = working.edges[rng.pick_index(working.edge_count())].clone();
        working = working.contract(&picked.source, &picked.target);
    }

    // Composite ids record their members, joined by '+'.
    let partitions: Vec<Vec<NodeId>> = working
        .nodes
        .iter()
        .map(|composite| composite.split('+').map(str::to_string).collect())
        .collect();

    result_for_partitions(graph, partitions)
}

/// Partition a graph into up to `parts` groups by recursive bisection.
///
/// Runs the exact two-way cut, then re-splits the larger side into
/// `parts - 1` groups over its induced subgraph, accumulating cut edges
/// from every recursion level. Base cases: `parts <= 1` or a graph with
/// 0–1 nodes yield the whole node set as a single partition with zero cut
/// weight. When `parts` exceeds the node count the recursion bottoms out
/// early and fewer groups come back.
#[must_use]
pub fn partition_into(graph: &Graph, parts: usize) -> MinCutResult {
    if parts <= 1 || graph.node_count() <= 1 {
        return MinCutResult::single(graph.nodes.clone());
    }

    let two_way = stoer_wagner(graph);
    let mut sides = two_way.partitions.into_iter();
    let first = sides.next().unwrap_or_default();
    let second = sides.next().unwrap_or_default();
    let (larger, smaller) = if first.len() >= second.len() {
        (first, second)
    } else {
        (second, first)
    };

    let inner = partition_into(&graph.induced_subgraph(&larger), parts - 1);

    let mut partitions = Vec::with_capacity(inner.partitions.len() + 1);
    partitions.push(smaller);
    partitions.extend(inner.partitions);

    result_for_partitions(graph, partitions)
}

/// Randomized N-way partitioning: recursive bisection over [`karger_cut`].
///
/// Same composition as [`partition_into`] with the exact cut swapped for
/// the seeded single-pass contraction, trading optimality for speed. On a
/// disconnected graph a single Karger pass can already return more than
/// two groups; the recursion stops as soon as `parts` groups exist.
#[must_use]
pub fn partition_into_randomized(
    graph: &Graph,
    parts: usize,
    rng: &mut SeededRng,
) -> MinCutResult {
    if parts <= 1 || graph.node_count() <= 1 {
        return MinCutResult::single(graph.nodes.clone());
    }

    let pass = karger_cut(graph, rng);
    if pass.partitions.len() >= parts {
        return pass;
    }

    let mut sides = pass.partitions;
    sides.sort_by_key(|p| std::cmp::Reverse(p.len()));
    let largest = sides.remove(0);

    let remaining = parts - sides.len();
    let inner = partition_into_randomized(&graph.induced_subgraph(&largest), remaining, rng);

    let mut partitions = sides;
    partitions.extend(inner.partitions);
    result_for_partitions(graph, partitions)
}

/// Group cut edges by the unordered pair of partition indices they
/// connect. An edge bleeds when its endpoints fall in different
/// partitions; edges touching nodes outside every partition are ignored.
#[must_use]
pub fn bleeding_edges(partitions: &[Vec<NodeId>], edges: &[Edge]) -> Vec<PartitionPairEdges> {
    let membership = membership_of(partitions);
    let mut grouped: BTreeMap<(usize, usize), Vec<Edge>> = BTreeMap::new();

    for edge in edges {
        let (Some(&a), Some(&b)) = (
            membership.get(edge.source.as_str()),
            membership.get(edge.target.as_str()),
        ) else {
            continue;
        };
        if a == b {
            continue;
        }
        grouped
            .entry((a.min(b), a.max(b)))
            .or_default()
            .push(edge.clone());
    }

    grouped
        .into_iter()
        .map(|(partitions, edges)| PartitionPairEdges { partitions, edges })
        .collect()
}

/// Recompute cut edges and weight from the original edge list, keeping the
/// cut-weight invariant true by construction.
fn result_for_partitions(graph: &Graph, partitions: Vec<Vec<NodeId>>) -> MinCutResult {
    let membership = membership_of(&partitions);
    let mut cut_edges = Vec::new();
    let mut cut_weight = 0.0f32;

    for edge in &graph.edges {
        let in_a = membership.get(edge.source.as_str());
        let in_b = membership.get(edge.target.as_str());
        if let (Some(a), Some(b)) = (in_a, in_b) {
            if a != b {
                cut_weight += edge.weight;
                cut_edges.push(edge.clone());
            }
        }
    }

    MinCutResult {
        partitions,
        cut_edges,
        cut_weight,
    }
}

fn membership_of(partitions: &[Vec<NodeId>]) -> HashMap<&str, usize> {
    let mut membership = HashMap::new();
    for (index, partition) in partitions.iter().enumerate() {
        for node in partition {
            membership.insert(node.as_str(), index);
        }
    }
    membership
}
