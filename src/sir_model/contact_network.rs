use{
    std::collections::BTreeMap,
    net_ensembles::{Graph, GenericGraph, AdjContainer, Node},
    crate::error::SirError,
    super::*
};

pub type ContactGraph = Graph<Individual>;

/// transmission weight of an edge without annotation
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Undirected contact network with a transmission weight in (0, 1] on every edge.
///
/// Edges are inserted in ascending `(min, max)` order, so every adjacency list
/// is sorted ascending. The propagation relies on this for reproducible draws.
#[derive(Clone, Debug)]
pub struct ContactNetwork{
    graph: ContactGraph,
    weights: BTreeMap<(usize, usize), f64>,
}

#[inline]
fn edge_key(u: usize, v: usize) -> (usize, usize)
{
    if u < v { (u, v) } else { (v, u) }
}

impl ContactNetwork{
    /// Every edge gets the default weight
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self, SirError>
    where I: IntoIterator<Item=(usize, usize)>
    {
        Self::from_weighted_edges(
            node_count,
            edges.into_iter().map(|(u, v)| (u, v, DEFAULT_WEIGHT))
        )
    }

    pub fn from_weighted_edges<I>(node_count: usize, edges: I) -> Result<Self, SirError>
    where I: IntoIterator<Item=(usize, usize, f64)>
    {
        let mut weights = BTreeMap::new();
        for (u, v, weight) in edges{
            for node in [u, v]{
                if node >= node_count{
                    return Err(SirError::UnknownNode{node, node_count});
                }
            }
            if u == v{
                return Err(SirError::InvalidEdge{u, v, reason: "self loops are not allowed".to_owned()});
            }
            // written as negation so that NaN is rejected as well
            if !(weight > 0.0 && weight <= 1.0){
                return Err(SirError::InvalidEdgeWeight{u, v, weight});
            }
            if weights.insert(edge_key(u, v), weight).is_some(){
                return Err(SirError::InvalidEdge{u, v, reason: "edge exists already".to_owned()});
            }
        }

        let mut graph = ContactGraph::new(node_count);
        // BTreeMap iterates in ascending key order -> sorted adjacency lists
        for &(u, v) in weights.keys(){
            graph.add_edge(u, v)
                .map_err(|e| SirError::InvalidEdge{u, v, reason: format!("{:?}", e)})?;
        }
        Ok(Self{graph, weights})
    }

    /// Copies the topology of any `net_ensembles` graph, `weight` is asked once per
    /// edge in ascending edge order
    pub fn from_graph<T, A, F>(graph: &GenericGraph<T, A>, mut weight: F) -> Result<Self, SirError>
    where T: Node,
        A: AdjContainer<T>,
        F: FnMut(usize, usize) -> f64
    {
        let mut edges: Vec<(usize, usize)> = (0..graph.vertex_count())
            .flat_map(
                |u|
                graph.container(u)
                    .neighbors()
                    .filter(move |&&v| v > u)
                    .map(move |&v| (u, v))
            ).collect();
        edges.sort_unstable();
        let weighted: Vec<_> = edges.into_iter()
            .map(|(u, v)| (u, v, weight(u, v)))
            .collect();
        Self::from_weighted_edges(graph.vertex_count(), weighted)
    }

    pub fn vertex_count(&self) -> usize
    {
        self.graph.vertex_count()
    }

    pub fn edge_count(&self) -> usize
    {
        self.weights.len()
    }

    /// neighbors of `node` in ascending order
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item=usize> + '_
    {
        self.graph.container(node).neighbors().copied()
    }

    pub fn degree(&self, node: usize) -> usize
    {
        self.graph.container(node).degree()
    }

    /// Weight of the edge (u, v), the default weight if there is no annotation
    pub fn weight(&self, u: usize, v: usize) -> f64
    {
        self.weights.get(&edge_key(u, v))
            .copied()
            .unwrap_or(DEFAULT_WEIGHT)
    }

    /// all edges as (min, max, weight), ascending
    pub fn edges(&self) -> impl Iterator<Item=(usize, usize, f64)> + '_
    {
        self.weights.iter().map(|(&(u, v), &w)| (u, v, w))
    }

    pub fn is_weighted(&self) -> bool
    {
        self.weights.values().any(|&w| w != DEFAULT_WEIGHT)
    }

    pub fn is_connected(&self) -> bool
    {
        self.graph.is_connected().unwrap_or(false)
    }

    pub fn check_node(&self, node: usize) -> Result<usize, SirError>
    {
        let node_count = self.vertex_count();
        if node < node_count {
            Ok(node)
        } else {
            Err(SirError::UnknownNode{node, node_count})
        }
    }
}
