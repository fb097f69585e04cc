use{
    std::collections::BTreeSet,
    serde::{Serialize, Deserialize},
    rand::{Rng, seq::SliceRandom},
    crate::{error::SirError, sir_model::ContactNetwork},
    super::*,
};

/// Which nodes are recovered (immune) before the first step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ImmunizationStrategy{
    None,
    /// k nodes uniformly at random
    Random(usize),
    /// the k nodes with the highest closeness centrality, distance = 1 / weight
    Closeness(usize),
    Explicit(Vec<usize>),
}

impl ImmunizationStrategy{
    pub fn name(&self) -> String
    {
        match self{
            Self::None => "none".to_owned(),
            Self::Random(k) => format!("rand{k}"),
            Self::Closeness(k) => format!("close{k}"),
            Self::Explicit(list) => format!("list{}", list.len())
        }
    }

    /// Only `Random` uses the rng
    pub fn is_random(&self) -> bool
    {
        matches!(self, Self::Random(_))
    }

    /// Nodes to immunize, never one of `reserved` (except when listed explicitly,
    /// the seeding takes care of that case), ascending
    pub fn select<R: Rng>(
        &self,
        network: &ContactNetwork,
        reserved: &[usize],
        rng: &mut R
    ) -> Result<Vec<usize>, SirError>
    {
        let selected = match self{
            Self::None => Vec::new(),
            Self::Random(k) => select_random(network.vertex_count(), *k, reserved, rng),
            Self::Closeness(k) => {
                let scores = closeness_centrality(network, inverse_weight)?;
                let mut top = select_top_k(&scores, *k, reserved);
                top.sort_unstable();
                top
            },
            Self::Explicit(list) => {
                let mut list = list.iter()
                    .map(|&node| network.check_node(node))
                    .collect::<Result<Vec<_>, _>>()?;
                list.sort_unstable();
                list.dedup();
                list
            }
        };
        log::debug!("immunizing {} nodes ({})", selected.len(), self.name());
        Ok(selected)
    }
}

/// The `k` best scoring nodes that are not reserved, best first.
/// Equal scores are ordered by ascending node index.
/// Fewer than `k` eligible nodes -> all of them.
pub fn select_top_k(scores: &[f64], k: usize, reserved: &[usize]) -> Vec<usize>
{
    let reserved: BTreeSet<usize> = reserved.iter().copied().collect();
    let mut eligible: Vec<usize> = (0..scores.len())
        .filter(|node| !reserved.contains(node))
        .collect();
    eligible.sort_by(
        |&a, &b|
        scores[b].total_cmp(&scores[a])
            .then(a.cmp(&b))
    );
    eligible.truncate(k);
    eligible
}

/// `k` distinct nodes out of `0..node_count` without the reserved ones, ascending
pub fn select_random<R: Rng>(node_count: usize, k: usize, reserved: &[usize], rng: &mut R) -> Vec<usize>
{
    let reserved: BTreeSet<usize> = reserved.iter().copied().collect();
    let eligible: Vec<usize> = (0..node_count)
        .filter(|node| !reserved.contains(node))
        .collect();
    let mut chosen: Vec<usize> = eligible.choose_multiple(rng, k)
        .copied()
        .collect();
    chosen.sort_unstable();
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn top_k_with_ties_and_reserved() {
        let scores = [0.2, 0.9, 0.5, 0.9, 0.1];
        assert_eq!(select_top_k(&scores, 3, &[]), vec![1, 3, 2]);
        assert_eq!(select_top_k(&scores, 2, &[1]), vec![3, 2]);
        assert_eq!(select_top_k(&scores, 0, &[]), Vec::<usize>::new());
        // not enough eligible nodes
        assert_eq!(select_top_k(&scores, 10, &[0, 1]), vec![3, 2, 4]);
    }

    #[test]
    fn random_selection() {
        let mut rng = Pcg64::seed_from_u64(12);
        let chosen = select_random(20, 5, &[0, 1], &mut rng);
        assert_eq!(chosen.len(), 5);
        assert!(chosen.windows(2).all(|w| w[0] < w[1]));
        assert!(!chosen.contains(&0) && !chosen.contains(&1));

        let all = select_random(4, 10, &[2], &mut rng);
        assert_eq!(all, vec![0, 1, 3]);

        let again = select_random(20, 5, &[0, 1], &mut Pcg64::seed_from_u64(12));
        assert_eq!(chosen, again);
    }

    #[test]
    fn closeness_strategy_skips_patient_zero() {
        // star around 0, 1 - 2 strong contact
        let net = ContactNetwork::from_weighted_edges(
            5,
            [(0, 1, 0.5), (0, 2, 0.5), (0, 3, 0.5), (0, 4, 0.5), (1, 2, 0.9)]
        ).unwrap();
        let mut rng = Pcg64::seed_from_u64(0);
        let chosen = ImmunizationStrategy::Closeness(2)
            .select(&net, &[0], &mut rng)
            .unwrap();
        assert_eq!(chosen, vec![1, 2]);
        let with_center = ImmunizationStrategy::Closeness(1)
            .select(&net, &[], &mut rng)
            .unwrap();
        assert_eq!(with_center, vec![0]);
    }

    #[test]
    fn explicit_list_is_checked() {
        let net = ContactNetwork::from_edges(3, [(0, 1)]).unwrap();
        let mut rng = Pcg64::seed_from_u64(0);
        assert_eq!(
            ImmunizationStrategy::Explicit(vec![2, 1, 2]).select(&net, &[], &mut rng),
            Ok(vec![1, 2])
        );
        assert!(ImmunizationStrategy::Explicit(vec![3]).select(&net, &[], &mut rng).is_err());
        assert_eq!(ImmunizationStrategy::None.select(&net, &[], &mut rng), Ok(Vec::new()));
    }
}
