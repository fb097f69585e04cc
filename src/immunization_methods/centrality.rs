use{
    std::ops::Deref,
    petgraph::{
        algo::dijkstra,
        graph::{NodeIndex, UnGraph},
        visit::EdgeRef,
    },
    crate::{error::SirError, sir_model::ContactNetwork},
};

/// Closeness centrality per node, only comparable within one network
#[derive(Clone, Debug, PartialEq)]
pub struct CentralityScore{
    scores: Vec<f64>
}

impl Deref for CentralityScore
{
    type Target = [f64];
    fn deref(&self) -> &Self::Target {
        &self.scores
    }
}

impl From<Vec<f64>> for CentralityScore{
    fn from(scores: Vec<f64>) -> Self{
        Self{scores}
    }
}

/// High weight means close contact, i.e. short distance
#[inline]
pub fn inverse_weight(weight: f64) -> f64
{
    1.0 / weight
}

/// Distance view of the contact network, the network itself is not touched
fn distance_graph<F>(network: &ContactNetwork, distance: F) -> Result<UnGraph<(), f64>, SirError>
where F: Fn(f64) -> f64
{
    let mut graph = UnGraph::with_capacity(network.vertex_count(), network.edge_count());
    for _ in 0..network.vertex_count(){
        graph.add_node(());
    }
    for (u, v, weight) in network.edges(){
        if !(weight > 0.0){
            return Err(SirError::InvalidEdgeWeight{u, v, weight});
        }
        let d = distance(weight);
        if !(d.is_finite() && d >= 0.0){
            return Err(SirError::InvalidDistance{u, v, weight, distance: d});
        }
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), d);
    }
    Ok(graph)
}

/// Closeness centrality with edge lengths `distance(weight)`.
///
/// Uses the Wasserman and Faust variant, so disconnected networks work:
/// a node reaching `r` nodes (itself included) with distance sum `d` scores
/// `(r - 1) / d * (r - 1) / (n - 1)`, isolated nodes score 0.
pub fn closeness_centrality<F>(network: &ContactNetwork, distance: F) -> Result<CentralityScore, SirError>
where F: Fn(f64) -> f64
{
    let graph = distance_graph(network, distance)?;
    let n = network.vertex_count();

    let scores = graph.node_indices()
        .map(
            |start|
            {
                let shortest = dijkstra(&graph, start, None, |e| *e.weight());
                // fixed summation order, independent of the hash map
                let total: f64 = graph.node_indices()
                    .filter_map(|i| shortest.get(&i))
                    .sum();
                let reached = shortest.len() as f64;
                if total > 0.0 && n > 1 {
                    let others = reached - 1.0;
                    (others / total) * (others / (n - 1) as f64)
                } else {
                    0.0
                }
            }
        ).collect();
    Ok(CentralityScore{scores})
}
