//! Dependency resolution engine
//!
//! Builds, for a root cell, the full transitive structure of cells its
//! formula reads from. Resolution is memoized by address, so a cell
//! reached via several paths occupies a single shared node and the result
//! is a rooted DAG stored in an arena. A visited-path guard turns
//! circular formulas into [`Error::CircularReference`] instead of
//! unbounded recursion.

use ahash::{AHashMap, AHashSet};
use log::{debug, trace};

use cellscope_core::{Cell, CellAddress, CellContent, CellStore, Error, Result};

use crate::extract::extract_refs;

/// Index of a node in a [`DependencyTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One resolved cell and the nodes its formula reads from
#[derive(Debug, Clone)]
pub struct DependencyNode {
    cell: Cell,
    deps: Vec<NodeId>,
}

impl DependencyNode {
    /// The resolved cell this node wraps
    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    /// The cell's address
    pub fn address(&self) -> CellAddress {
        self.cell.address
    }

    /// The cell's literal value, if it holds one
    pub fn value(&self) -> Option<f64> {
        self.cell.value
    }

    /// Nodes this cell's formula directly references
    pub fn dependencies(&self) -> &[NodeId] {
        &self.deps
    }

    /// True for literal cells, which reference nothing
    pub fn is_leaf(&self) -> bool {
        self.deps.is_empty()
    }
}

/// A resolved dependency structure: an arena of shared nodes rooted at
/// the target cell
///
/// Dependency links are arena indices rather than owned subtrees, so a
/// cell referenced via multiple paths is resolved once and shared. Nodes
/// are created bottom-up during resolution and are immutable afterwards.
#[derive(Debug)]
pub struct DependencyTree {
    nodes: Vec<DependencyNode>,
    root: NodeId,
    stats: ResolveStats,
}

impl DependencyTree {
    /// The root node (the cell resolution started from)
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> &DependencyNode {
        &self.nodes[id.0]
    }

    /// Total number of distinct cells in the structure
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all nodes with their ids
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &DependencyNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Statistics gathered while resolving
    pub fn stats(&self) -> &ResolveStats {
        &self.stats
    }
}

/// Options controlling resolution
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Maximum dependency chain depth before resolution fails with
    /// [`Error::DepthLimitExceeded`] (default: 1024)
    pub max_depth: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { max_depth: 1024 }
    }
}

/// Statistics from a resolution run
#[derive(Debug, Clone, Default)]
pub struct ResolveStats {
    /// Number of distinct cells resolved
    pub cells_resolved: usize,
    /// Number of those holding formulas
    pub formula_cells: usize,
    /// Number of references answered from the memo table
    pub memo_hits: usize,
    /// Longest dependency chain encountered
    pub max_depth: usize,
}

/// Resolve the full dependency tree for an A1-style address with default
/// options
///
/// # Example
///
/// ```rust
/// use cellscope_core::SheetStore;
/// use cellscope_trace::resolve;
///
/// let mut store = SheetStore::new("Sheet1");
/// store.set_value("A1", 5.0).unwrap();
/// store.set_value("B1", 10.0).unwrap();
/// store.set_formula("C1", "=A1+B1").unwrap();
///
/// let tree = resolve(&store, "C1").unwrap();
/// assert_eq!(tree.node_count(), 3);
/// ```
pub fn resolve<S: CellStore>(store: &S, address: &str) -> Result<DependencyTree> {
    resolve_with_options(store, address, &ResolveOptions::default())
}

/// Resolve with explicit [`ResolveOptions`]
pub fn resolve_with_options<S: CellStore>(
    store: &S,
    address: &str,
    options: &ResolveOptions,
) -> Result<DependencyTree> {
    let root = CellAddress::parse(address)?;
    Resolver::new(store, options.clone()).resolve_tree(root)
}

/// The resolution engine
///
/// Holds the arena under construction, the memo table keyed by address,
/// and the stack of addresses currently being resolved (the cycle guard).
pub struct Resolver<'a, S: CellStore> {
    store: &'a S,
    options: ResolveOptions,
    nodes: Vec<DependencyNode>,
    memo: AHashMap<CellAddress, NodeId>,
    path: Vec<CellAddress>,
    on_path: AHashSet<CellAddress>,
    stats: ResolveStats,
}

impl<'a, S: CellStore> Resolver<'a, S> {
    /// Create a resolver against a store
    pub fn new(store: &'a S, options: ResolveOptions) -> Self {
        Self {
            store,
            options,
            nodes: Vec::new(),
            memo: AHashMap::new(),
            path: Vec::new(),
            on_path: AHashSet::new(),
            stats: ResolveStats::default(),
        }
    }

    /// Resolve the dependency structure rooted at `root`
    ///
    /// Fails fast on the first error; callers see either a complete tree
    /// or an error, never a partial one.
    pub fn resolve_tree(mut self, root: CellAddress) -> Result<DependencyTree> {
        let root_id = self.resolve_cell(root)?;
        debug!(
            "resolved {} cells ({} formulas, {} memo hits) for root {}",
            self.stats.cells_resolved, self.stats.formula_cells, self.stats.memo_hits, root
        );
        Ok(DependencyTree {
            nodes: self.nodes,
            root: root_id,
            stats: self.stats,
        })
    }

    fn resolve_cell(&mut self, addr: CellAddress) -> Result<NodeId> {
        if self.on_path.contains(&addr) {
            return Err(Error::CircularReference(self.cycle_path(addr)));
        }

        if let Some(&id) = self.memo.get(&addr) {
            self.stats.memo_hits += 1;
            return Ok(id);
        }

        if self.path.len() >= self.options.max_depth {
            return Err(Error::DepthLimitExceeded(self.options.max_depth));
        }

        let node = match self.store.content(&addr)? {
            CellContent::Literal(value) => {
                trace!("leaf {} = {:?}", addr, value);
                DependencyNode {
                    cell: Cell::new(self.store.sheet_name(), addr, value),
                    deps: Vec::new(),
                }
            }
            CellContent::Formula(text) => {
                trace!("formula {} = {}", addr, text);
                self.stats.formula_cells += 1;

                let refs = extract_refs(&text)?;

                self.path.push(addr);
                self.on_path.insert(addr);
                self.stats.max_depth = self.stats.max_depth.max(self.path.len());

                let mut deps = Vec::with_capacity(refs.len());
                for parent in refs {
                    match self.resolve_cell(parent) {
                        Ok(id) => deps.push(id),
                        Err(e) => {
                            self.path.pop();
                            self.on_path.remove(&addr);
                            return Err(e);
                        }
                    }
                }

                self.path.pop();
                self.on_path.remove(&addr);

                DependencyNode {
                    cell: Cell::new(self.store.sheet_name(), addr, None),
                    deps,
                }
            }
        };

        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.memo.insert(addr, id);
        self.stats.cells_resolved += 1;
        Ok(id)
    }

    /// Describe the cycle closing at `addr` as an A1 path
    fn cycle_path(&self, addr: CellAddress) -> String {
        let start = self
            .path
            .iter()
            .position(|a| *a == addr)
            .unwrap_or(0);

        let mut parts: Vec<String> = self.path[start..].iter().map(|a| a.to_string()).collect();
        parts.push(addr.to_string());
        parts.join(" -> ")
    }
}
