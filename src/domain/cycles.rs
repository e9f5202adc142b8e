//! Dependency cycle report
//!
//! Cycles are legal in a document; weighting tolerates them. This module
//! only finds them so they can be shown to the user. Uses petgraph's
//! strongly connected components.

use std::collections::HashSet;

use petgraph::algo::{astar, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};

use super::entry::EntryIdx;
use super::stack::Stack;

/// Builds a graph with one node per entry and an edge `entry -> dependency`
fn dependency_graph(stack: &Stack) -> DiGraph<EntryIdx, ()> {
    let mut graph = DiGraph::with_capacity(stack.len(), 0);
    for (idx, _) in stack.entries() {
        graph.add_node(idx);
    }
    for (idx, entry) in stack.entries() {
        for dep in entry.dependencies() {
            if dep.index() < stack.len() {
                graph.add_edge(NodeIndex::new(idx.index()), NodeIndex::new(dep.index()), ());
            }
        }
    }
    graph
}

/// Shortest dependency chain from `from` to the first node accepted by `goal`
fn shortest_chain(
    graph: &DiGraph<EntryIdx, ()>,
    from: NodeIndex,
    goal: impl FnMut(NodeIndex) -> bool,
) -> Option<Vec<NodeIndex>> {
    astar(graph, from, goal, |_| 1u32, |_| 0).map(|(_, path)| path)
}

/// Walks a strongly connected component along real dependency links
///
/// Starts at the member earliest in document order, hops to the nearest
/// member not yet visited until all are covered, then closes back on the
/// start. Each member of the result depends on the next one, and the last
/// depends on the first. Members may repeat when the component is not a
/// simple ring. Shortest chains between members of one component never
/// leave it.
fn closed_walk(graph: &DiGraph<EntryIdx, ()>, component: &[NodeIndex]) -> Vec<NodeIndex> {
    let Some(&start) = component.iter().min() else {
        return Vec::new();
    };

    let mut remaining: HashSet<NodeIndex> =
        component.iter().copied().filter(|n| *n != start).collect();
    let mut walk = vec![start];
    let mut current = start;

    while !remaining.is_empty() {
        let Some(chain) = shortest_chain(graph, current, |n| remaining.contains(&n)) else {
            break;
        };
        for node in chain.into_iter().skip(1) {
            remaining.remove(&node);
            walk.push(node);
            current = node;
        }
    }

    if current != start {
        if let Some(chain) = shortest_chain(graph, current, |n| n == start) {
            let inner = chain.len().saturating_sub(1);
            walk.extend(chain.into_iter().take(inner).skip(1));
        }
    }

    walk
}

/// Returns every dependency cycle in the stack
///
/// Each cycle covers one strongly connected component (or a single
/// self-dependent entry) as a closed walk: every entry depends on the one
/// after it, and the last depends on the first. Cycles are ordered by
/// their first entry, which is the earliest member in document order.
pub fn find_cycles(stack: &Stack) -> Vec<Vec<EntryIdx>> {
    let graph = dependency_graph(stack);

    let mut cycles: Vec<Vec<EntryIdx>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [single] => graph.contains_edge(*single, *single),
            _ => true,
        })
        .map(|component| {
            closed_walk(&graph, &component)
                .into_iter()
                .map(|n| graph[n])
                .collect()
        })
        .collect();

    cycles.sort();
    cycles
}
