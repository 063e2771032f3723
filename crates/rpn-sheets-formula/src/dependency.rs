//! Dependency resolution for formula calculation
//!
//! Before a formula that references other cells is evaluated, every formula in
//! its transitive closure must have a value. [`evaluation_order`] computes a
//! topological order of that closure without recursion:
//!
//! 1. A breadth-first walk from the root records, for every unevaluated
//!    dependency that itself has references, the set of formulas depending on
//!    it (reverse edges). Leaves are skipped: they are evaluated on demand.
//! 2. If anything points back at the root, the root is on a cycle; walking the
//!    reverse edges from the root collects every cell of that cycle.
//! 3. Kahn's algorithm releases a formula once nothing unresolved depends on
//!    it; released formulas are prepended, so the root ends up last.
//! 4. Reverse edges that were never released belong to a cycle reachable
//!    from the root.
//!
//! All bookkeeping lives in this call, so formulas stay immutable apart from
//! their compute-once value and concurrent resolutions never interfere.

use crate::error::{FormulaError, FormulaResult};
use crate::formula::Formula;
use crate::grid::Grid;
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

/// Node of the dependency graph explored by one resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Node {
    /// Formula being resolved when it is not installed in the grid
    Root,
    /// Formula installed in the grid, by flat index
    Cell(usize),
}

/// Call-local state of one resolution
struct Resolution<'g> {
    grid: &'g Grid,
    root: &'g Formula,
    root_node: Node,
    /// Node -> nodes that still depend on it
    dependents: AHashMap<Node, AHashSet<Node>>,
}

impl<'g> Resolution<'g> {
    fn new(root: &'g Formula, grid: &'g Grid) -> Self {
        let root_node = root
            .home()
            .and_then(|addr| grid.size().index_of(addr))
            .map_or(Node::Root, Node::Cell);

        Self {
            grid,
            root,
            root_node,
            dependents: AHashMap::new(),
        }
    }

    fn formula(&self, node: Node) -> FormulaResult<&'g Formula> {
        match node {
            _ if node == self.root_node => Ok(self.root),
            Node::Root => Ok(self.root),
            Node::Cell(index) => self.grid.formula_at(index),
        }
    }

    fn dependencies(&self, node: Node) -> FormulaResult<&'g [usize]> {
        self.formula(node)?.dependencies(self.grid)
    }

    fn name(&self, node: Node) -> String {
        match node {
            Node::Cell(index) => self.grid.name_of(index),
            Node::Root => format!("'{}'", self.root),
        }
    }

    /// Breadth-first walk recording reverse edges of the unresolved subgraph
    fn collect_dependents(&mut self) -> FormulaResult<()> {
        let mut visited = AHashSet::new();
        visited.insert(self.root_node);
        let mut queue = VecDeque::from([self.root_node]);

        while let Some(next) = queue.pop_front() {
            for &index in self.dependencies(next)? {
                let dep = Node::Cell(index);
                let formula = self.formula(dep)?;
                if formula.is_evaluated() || !formula.has_dependencies() {
                    continue;
                }

                self.dependents.entry(dep).or_default().insert(next);
                if visited.insert(dep) {
                    queue.push_back(dep);
                }
            }
        }

        Ok(())
    }

    /// Kahn-style pass; returns the root's dependencies ordered before their dependents
    fn release_in_order(&mut self) -> FormulaResult<Vec<usize>> {
        let mut ordered = VecDeque::new();
        let mut ready = VecDeque::from([self.root_node]);

        while let Some(next) = ready.pop_front() {
            ordered.push_front(next);

            for &index in self.dependencies(next)? {
                let dep = Node::Cell(index);
                let Some(waiting) = self.dependents.get_mut(&dep) else {
                    continue;
                };
                waiting.remove(&next);
                if waiting.is_empty() {
                    self.dependents.remove(&dep);
                    ready.push_back(dep);
                }
            }
        }

        // The root is evaluated by its caller
        ordered.pop_back();

        Ok(ordered
            .into_iter()
            .filter_map(|node| match node {
                Node::Cell(index) => Some(index),
                Node::Root => None,
            })
            .collect())
    }

    /// Nodes that lead back to the root: the root's dependents, theirs, and so on.
    /// Every one of them was reached from the root, so each lies on a cycle
    /// through it.
    fn cycle_through_root(&self) -> AHashSet<Node> {
        let mut on_cycle = AHashSet::new();
        on_cycle.insert(self.root_node);
        let mut queue = VecDeque::from([self.root_node]);

        while let Some(node) = queue.pop_front() {
            let Some(waiting) = self.dependents.get(&node) else {
                continue;
            };
            for &dependent in waiting {
                if on_cycle.insert(dependent) {
                    queue.push_back(dependent);
                }
            }
        }

        on_cycle
    }

    fn cycle_error(&self, nodes: impl IntoIterator<Item = Node>) -> FormulaError {
        let mut cells: Vec<String> = nodes.into_iter().map(|n| self.name(n)).collect();
        cells.sort();
        cells.dedup();
        tracing::warn!(cells = ?cells, "cyclic dependency detected");
        FormulaError::CyclicDependency { cells }
    }
}

/// Order in which the formulas referenced by `root` (transitively) must be
/// evaluated, as flat grid indices. The root itself is not included, nor are
/// formulas that are already evaluated or reference nothing.
///
/// Fails with [`FormulaError::CyclicDependency`] if the closure contains a cycle.
pub fn evaluation_order(root: &Formula, grid: &Grid) -> FormulaResult<Vec<usize>> {
    let mut resolution = Resolution::new(root, grid);
    resolution.collect_dependents()?;

    if resolution.dependents.contains_key(&resolution.root_node) {
        let nodes = resolution.cycle_through_root();
        return Err(resolution.cycle_error(nodes));
    }

    let order = resolution.release_in_order()?;

    // Every entry left belongs to the closure and sits on or behind a cycle
    if !resolution.dependents.is_empty() {
        let nodes: Vec<Node> = resolution.dependents.keys().copied().collect();
        return Err(resolution.cycle_error(nodes));
    }

    Ok(order)
}

/// Evaluate everything `root` depends on, in dependency order.
///
/// Each formula is evaluated without triggering another resolution; formulas
/// shared by several paths hit their memoized value. Returns the number of
/// formulas evaluated.
pub fn resolve(root: &Formula, grid: &Grid) -> FormulaResult<usize> {
    let order = evaluation_order(root, grid)?;

    if let Some(home) = root.home() {
        tracing::debug!(cell = %home, dependencies = order.len(), "resolved evaluation order");
    }

    for &index in &order {
        grid.formula_at(index)?.evaluate_resolved(grid)?;
    }

    Ok(order.len())
}
