use {
    serde::{Serialize, Deserialize},
    std::num::*,
    rand_pcg::Pcg64,
    net_ensembles::{
        WithGraph,
        GenericGraph,
        AdjContainer,
        SimpleSample,
        ErEnsembleC,
        SwEnsemble,
        BAensemble,
        rand::SeedableRng,
    },
    crate::{error::SirError, misc_types::*},
    super::*,
};

/// Give up looking for a connected network after this many randomizations
pub const MAX_RANDOMIZATIONS: u32 = 10_000;

/// Everything needed to generate the same contact network again
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NetworkOptions{
    pub system_size: NonZeroUsize,
    pub graph_type: GraphType,
    pub graph_seed: u64,
    pub edge_weights: WeightScheme,
    pub weight_seed: u64,
    /// redraw the network until it is connected
    pub require_connected: bool,
}

impl Default for NetworkOptions{
    fn default() -> Self{
        Self{
            system_size: DEFAULT_SYSTEM_SIZE,
            graph_type: GraphType::ErdosRenyi(DEFAULT_EDGE_PROB),
            graph_seed: DEFAULT_GRAPH_SEED,
            edge_weights: WeightScheme::default(),
            weight_seed: DEFAULT_WEIGHT_SEED,
            require_connected: false
        }
    }
}

impl NetworkOptions{
    pub fn name(&self) -> String
    {
        format!(
            "N{}G{}{}GS{}WS{}",
            self.system_size,
            self.graph_type.name(),
            self.edge_weights.name(),
            self.graph_seed,
            self.weight_seed
        )
    }

    pub fn build(&self) -> Result<ContactNetwork, SirError>
    {
        let n = self.system_size.get();
        self.graph_type.check(n)?;
        let graph_rng = Pcg64::seed_from_u64(self.graph_seed);
        match self.graph_type{
            GraphType::ErdosRenyi(p) => {
                // G(n, p) has mean degree p (n-1)
                let c = p * n.saturating_sub(1) as f64;
                let ensemble = ErEnsembleC::<Individual, Pcg64>::new(n, c, graph_rng);
                self.finish(ensemble)
            },
            GraphType::SmallWorld(rewire_prob) => {
                let ensemble = SwEnsemble::<Individual, Pcg64>::new(n, rewire_prob, graph_rng);
                self.finish(ensemble)
            },
            GraphType::Barabasi(m, source_n) => {
                let ensemble = BAensemble::<Individual, Pcg64>::new(n, graph_rng, m, source_n);
                self.finish(ensemble)
            }
        }
    }

    fn finish<E, A>(&self, mut ensemble: E) -> Result<ContactNetwork, SirError>
    where E: WithGraph<Individual, GenericGraph<Individual, A>> + SimpleSample,
        A: AdjContainer<Individual>
    {
        if self.require_connected{
            let mut counter = 0_u32;
            while !ensemble.graph().is_connected().unwrap_or(false)
            {
                if counter >= MAX_RANDOMIZATIONS{
                    return Err(SirError::Disconnected{attempts: counter});
                }
                counter += 1;
                ensemble.randomize();
            }
            if counter > 0
            {
                log::info!("Randomized the ensemble {} additional times to find a connected network", counter);
            }
        }

        let mut weight_rng = Pcg64::seed_from_u64(self.weight_seed);
        let network = ContactNetwork::from_graph(
            ensemble.graph(),
            |_, _| self.edge_weights.draw(&mut weight_rng)
        )?;
        log::info!(
            "created network with {} nodes and {} edges",
            network.vertex_count(),
            network.edge_count()
        );
        Ok(network)
    }
}
