//! Level assignment relative to the queried node.

use std::collections::{HashMap, VecDeque};

use super::LineageGraph;

impl LineageGraph {
    /// Assign each node its distance from `root_id`.
    ///
    /// The root gets level 0. Nodes reached by following edges forward get
    /// positive levels, nodes reached against edge direction get negative ones.
    /// A node reachable both ways keeps the level found first by the
    /// downstream walk. Unreachable nodes are left unchanged.
    ///
    /// Returns the number of nodes assigned, or 0 if the root is absent.
    pub fn assign_levels(&mut self, root_id: &str) -> usize {
        if !self.contains_node(root_id) {
            return 0;
        }

        let mut forward: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut backward: HashMap<&str, Vec<&str>> = HashMap::new();
        for (_, edge) in self.edges() {
            forward.entry(&edge.from).or_default().push(&edge.to);
            backward.entry(&edge.to).or_default().push(&edge.from);
        }

        let mut levels: HashMap<String, i32> = HashMap::new();
        levels.insert(root_id.to_string(), 0);
        walk(root_id, &forward, 1, &mut levels);
        walk(root_id, &backward, -1, &mut levels);

        let mut assigned = 0;
        self.update_nodes(|node| {
            if let Some(&level) = levels.get(&node.id) {
                node.level = level;
                assigned += 1;
            }
        });
        assigned
    }
}

/// Breadth-first walk from `root`, stepping `step` per hop.
fn walk<'a>(
    root: &'a str,
    adjacency: &HashMap<&'a str, Vec<&'a str>>,
    step: i32,
    levels: &mut HashMap<String, i32>,
) {
    let mut queue = VecDeque::from([(root, 0)]);

    while let Some((current, level)) = queue.pop_front() {
        let Some(neighbours) = adjacency.get(current) else {
            continue;
        };
        for &next in neighbours {
            if levels.contains_key(next) {
                continue;
            }
            levels.insert(next.to_string(), level + step);
            queue.push_back((next, level + step));
        }
    }
}
