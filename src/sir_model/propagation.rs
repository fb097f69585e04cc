use{
    std::num::NonZeroUsize,
    rand::Rng,
    serde::{Serialize, Deserialize},
    crate::error::*,
    super::*
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SirParams{
    /// transmission probability across an edge of weight 1
    pub beta: f64,
    /// recovery probability per step
    pub gamma: f64,
    /// Give up after this many steps. `None` means: trust that gamma > 0
    pub max_steps: Option<NonZeroUsize>,
}

/// Discrete time SIR dynamics on a fixed contact network.
///
/// Each step is synchronous: the next state is computed from a frozen copy of the
/// current state. For every infected node (ascending index) every susceptible
/// neighbor (ascending index) gets one draw against `beta * weight`, followed by one
/// recovery draw against `gamma`. A node that recovers in a step can still infect
/// its neighbors in that same step.
#[derive(Clone, Debug)]
pub struct SirModel<'a>{
    network: &'a ContactNetwork,
    beta: f64,
    gamma: f64,
    max_steps: Option<NonZeroUsize>,
}

impl<'a> SirModel<'a>{
    pub fn new(network: &'a ContactNetwork, params: SirParams) -> Result<Self, SirError>
    {
        Ok(
            Self{
                network,
                beta: check_probability("beta", params.beta)?,
                gamma: check_probability("gamma", params.gamma)?,
                max_steps: params.max_steps
            }
        )
    }

    #[inline]
    pub fn transmission_probability(&self, u: usize, v: usize) -> f64
    {
        self.beta * self.network.weight(u, v)
    }

    /// Everyone susceptible, except the immunized (recovered) and the initially
    /// infected. Infection wins if a node is in both lists.
    pub fn initial_state(&self, initial_infected: &[usize], immunized: &[usize]) -> Result<SimulationState, SirError>
    {
        let mut state = SimulationState::new(self.network.vertex_count());
        for &node in immunized{
            state.set(self.network.check_node(node)?, HealthState::Recovered);
        }
        for &node in initial_infected{
            state.set(self.network.check_node(node)?, HealthState::Infected);
        }
        Ok(state)
    }

    /// Computes the state after one step, `current` is left untouched
    pub fn step<R>(&self, current: &SimulationState, rng: &mut R) -> SimulationState
    where R: Rng + ?Sized
    {
        let mut next = current.clone();

        for (index, _) in current.iter()
            .enumerate()
            .filter(|(_, state)| state.inf_check())
        {
            for neighbor in self.network
                .neighbors(index)
                .filter(|&n| current.state(n).sus_check())
            {
                let prob: f64 = rng.gen();
                if prob < self.transmission_probability(index, neighbor){
                    next.set(neighbor, HealthState::Infected);
                }
            }
            // recoveries don't care about the topology
            if rng.gen::<f64>() < self.gamma{
                next.set(index, HealthState::Recovered);
            }
        }
        next
    }

    /// Runs until no node is infected anymore.
    ///
    /// Returns `NonTerminating` if `max_steps` is set and exceeded. Without
    /// `max_steps` this does not return for gamma = 0 and a surviving infection.
    pub fn propagate_until_completion<R>(&self, initial: SimulationState, rng: &mut R) -> Result<Trajectory, SirError>
    where R: Rng + ?Sized
    {
        let mut snapshots = Vec::new();
        let mut infection_counts = Vec::new();
        let mut current = initial;

        while current.has_infected(){
            if let Some(max) = self.max_steps{
                if infection_counts.len() >= max.get(){
                    return Err(SirError::NonTerminating{max_steps: max.get()});
                }
            }
            let next = self.step(&current, rng);
            infection_counts.push(next.infected_count());
            snapshots.push(current);
            current = next;
        }
        snapshots.push(current);
        log::debug!("extinct after {} steps", infection_counts.len());
        Ok(Trajectory::new(snapshots, infection_counts))
    }

    /// [SirModel::initial_state] followed by [SirModel::propagate_until_completion]
    pub fn run<R>(&self, initial_infected: &[usize], immunized: &[usize], rng: &mut R) -> Result<Trajectory, SirError>
    where R: Rng + ?Sized
    {
        let initial = self.initial_state(initial_infected, immunized)?;
        if initial_infected.is_empty(){
            log::warn!("no initially infected node, the trajectory is a single snapshot");
        }
        self.propagate_until_completion(initial, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg64;

    /// Returns the scripted draws first (as seen by `rng.gen::<f64>()`),
    /// afterwards falls back to a seeded Pcg64
    struct ScriptedRng{
        script: VecDeque<u64>,
        fallback: Pcg64
    }

    impl ScriptedRng{
        fn new(draws: &[f64]) -> Self
        {
            // Standard f64 sampling uses the upper 53 bits
            let script = draws.iter()
                .map(|&d| ((d * (1_u64 << 53) as f64) as u64) << 11)
                .collect();
            Self{script, fallback: Pcg64::seed_from_u64(7)}
        }

        fn remaining(&self) -> usize
        {
            self.script.len()
        }
    }

    impl RngCore for ScriptedRng{
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }
        fn next_u64(&mut self) -> u64 {
            match self.script.pop_front(){
                Some(v) => v,
                None => self.fallback.next_u64()
            }
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            rand::rngs::mock::StepRng::new(self.next_u64(), 0).fill_bytes(dest)
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn path(n: usize) -> ContactNetwork
    {
        ContactNetwork::from_edges(n, (1..n).map(|i| (i - 1, i))).unwrap()
    }

    fn params(beta: f64, gamma: f64) -> SirParams
    {
        SirParams{beta, gamma, max_steps: None}
    }

    fn random_network(n: usize, p: f64, seed: u64) -> ContactNetwork
    {
        let mut rng = Pcg64::seed_from_u64(seed);
        let weights = [0.1, 0.3, 0.5, 0.9];
        let mut edges = Vec::new();
        for u in 0..n{
            for v in u+1..n{
                if rng.gen::<f64>() < p{
                    edges.push((u, v, weights[rng.gen_range(0..weights.len())]));
                }
            }
        }
        ContactNetwork::from_weighted_edges(n, edges).unwrap()
    }

    #[test]
    fn scripted_rng_delivers_draws() {
        let mut rng = ScriptedRng::new(&[0.1, 0.9, 0.0]);
        let a: f64 = rng.gen();
        let b: f64 = rng.gen();
        let c: f64 = rng.gen();
        assert!((a - 0.1).abs() < 1e-12);
        assert!((b - 0.9).abs() < 1e-12);
        assert_eq!(c, 0.0);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn rejects_invalid_probabilities() {
        let net = path(3);
        assert!(matches!(
            SirModel::new(&net, params(1.2, 0.1)),
            Err(SirError::InvalidProbability{name: "beta", ..})
        ));
        assert!(matches!(
            SirModel::new(&net, params(0.5, -0.1)),
            Err(SirError::InvalidProbability{name: "gamma", ..})
        ));
    }

    #[test]
    fn path_scenario_first_step() {
        let net = path(4);
        let model = SirModel::new(&net, params(0.5, 0.2)).unwrap();
        let initial = model.initial_state(&[0], &[]).unwrap();
        assert_eq!(initial.symbols(), "ISSS");

        // 0 -> 1 transmission succeeds, recovery of 0 fails
        let mut rng = ScriptedRng::new(&[0.1, 0.9]);
        let next = model.step(&initial, &mut rng);
        assert_eq!(next.symbols(), "IISS");
        assert_eq!(rng.remaining(), 0);
        // frozen snapshot untouched
        assert_eq!(initial.symbols(), "ISSS");

        let mut rng = ScriptedRng::new(&[0.1, 0.9]);
        let trajectory = model.propagate_until_completion(initial, &mut rng).unwrap();
        assert_eq!(trajectory.snapshots()[0].symbols(), "ISSS");
        assert_eq!(trajectory.snapshots()[1].symbols(), "IISS");
        assert_eq!(trajectory.infection_counts()[0], 2);
        assert!(!trajectory.terminal().has_infected());
        assert!(trajectory.duration() < 1000);
    }

    #[test]
    fn transmission_draws_use_weight() {
        let net = ContactNetwork::from_weighted_edges(2, [(0, 1, 0.3)]).unwrap();
        let model = SirModel::new(&net, params(0.5, 0.0)).unwrap();
        assert!((model.transmission_probability(0, 1) - 0.15).abs() < 1e-12);
        let initial = model.initial_state(&[0], &[]).unwrap();

        // 0.2 < 0.5 but not < 0.15
        let mut rng = ScriptedRng::new(&[0.2, 0.5]);
        assert_eq!(model.step(&initial, &mut rng).symbols(), "IS");

        let mut rng = ScriptedRng::new(&[0.1, 0.5]);
        assert_eq!(model.step(&initial, &mut rng).symbols(), "II");
    }

    #[test]
    fn recovery_and_transmission_in_same_step() {
        let net = path(2);
        let model = SirModel::new(&net, params(1.0, 1.0)).unwrap();
        let initial = model.initial_state(&[0], &[]).unwrap();
        let mut rng = ScriptedRng::new(&[0.5, 0.5]);
        assert_eq!(model.step(&initial, &mut rng).symbols(), "RI");
    }

    #[test]
    fn synchronous_update() {
        // 0 infects 1 but 1 must not infect 2 within the same step
        let net = path(3);
        let model = SirModel::new(&net, params(1.0, 0.0)).unwrap();
        let initial = model.initial_state(&[0], &[]).unwrap();
        let mut rng = Pcg64::seed_from_u64(1);
        let next = model.step(&initial, &mut rng);
        assert_eq!(next.symbols(), "IIS");
    }

    #[test]
    fn multiple_exposures_in_one_step() {
        // star center 1 with infected leaves 0 and 2
        let net = path(3);
        let model = SirModel::new(&net, params(0.5, 0.0)).unwrap();
        let initial = model.initial_state(&[0, 2], &[]).unwrap();
        // 0->1 succeeds, 0 stays, 2->1 fails, 2 stays
        let mut rng = ScriptedRng::new(&[0.1, 0.9, 0.9, 0.9]);
        let next = model.step(&initial, &mut rng);
        assert_eq!(next.symbols(), "III");
        // the second exposure was still evaluated
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn infection_wins_over_immunization() {
        let net = path(4);
        let model = SirModel::new(&net, params(0.5, 0.2)).unwrap();
        let initial = model.initial_state(&[1], &[1, 3]).unwrap();
        assert_eq!(initial.symbols(), "SISR");
    }

    #[test]
    fn unknown_seed_node() {
        let net = path(4);
        let model = SirModel::new(&net, params(0.5, 0.2)).unwrap();
        assert!(matches!(
            model.initial_state(&[4], &[]),
            Err(SirError::UnknownNode{node: 4, node_count: 4})
        ));
        assert!(matches!(
            model.initial_state(&[0], &[10]),
            Err(SirError::UnknownNode{node: 10, ..})
        ));
    }

    #[test]
    fn empty_seed_gives_single_snapshot() {
        let net = path(4);
        let model = SirModel::new(&net, params(0.5, 0.2)).unwrap();
        let mut rng = Pcg64::seed_from_u64(3);
        let trajectory = model.run(&[], &[2], &mut rng).unwrap();
        assert!(trajectory.infection_counts().is_empty());
        assert_eq!(trajectory.snapshots().len(), 1);
        assert_eq!(trajectory.initial().symbols(), "SSRS");
    }

    #[test]
    fn step_guard_reports_non_termination() {
        let net = path(3);
        let model = SirModel::new(
            &net,
            SirParams{beta: 0.5, gamma: 0.0, max_steps: NonZeroUsize::new(25)}
        ).unwrap();
        let mut rng = Pcg64::seed_from_u64(3);
        assert_eq!(
            model.run(&[0], &[], &mut rng),
            Err(SirError::NonTerminating{max_steps: 25})
        );
    }

    #[test]
    fn conservation_monotonicity_termination() {
        for seed in 0..20{
            let net = random_network(40, 0.1, seed);
            let model = SirModel::new(&net, params(0.7, 0.4)).unwrap();
            let mut rng = Pcg64::seed_from_u64(seed + 100);
            let trajectory = model.run(&[0], &[5, 6, 7], &mut rng).unwrap();

            assert_eq!(trajectory.snapshots().len(), trajectory.infection_counts().len() + 1);
            for snapshot in trajectory.snapshots(){
                let (s, i, r) = snapshot.sir_counts();
                assert_eq!(s + i + r, net.vertex_count());
                assert_eq!(snapshot.len(), net.vertex_count());
            }
            for (count, snapshot) in trajectory.infection_counts()
                .iter()
                .zip(&trajectory.snapshots()[1..])
            {
                assert_eq!(*count, snapshot.infected_count());
            }
            for pair in trajectory.snapshots().windows(2){
                for (before, after) in pair[0].iter().zip(pair[1].iter()){
                    assert!(before.may_become(*after));
                }
            }
            assert!(!trajectory.terminal().has_infected());
            assert_eq!(*trajectory.infection_counts().last().unwrap(), 0);
        }
    }

    #[test]
    fn reseeding_reproduces_the_run() {
        let net = random_network(50, 0.08, 25);
        let model = SirModel::new(&net, params(0.5, 0.35)).unwrap();
        let a = model.run(&[0], &[], &mut Pcg64::seed_from_u64(42)).unwrap();
        let b = model.run(&[0], &[], &mut Pcg64::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn heavier_edge_never_infects_less() {
        for seed in 0..200{
            let mut infected = [false; 2];
            for (i, w) in [0.3, 0.9].into_iter().enumerate(){
                let net = ContactNetwork::from_weighted_edges(3, [(0, 1, w), (1, 2, 0.5)]).unwrap();
                let model = SirModel::new(&net, params(0.8, 0.3)).unwrap();
                let initial = model.initial_state(&[1], &[]).unwrap();
                let next = model.step(&initial, &mut Pcg64::seed_from_u64(seed));
                infected[i] = next.state(0).inf_check();
            }
            assert!(!infected[0] || infected[1]);
        }
    }
}
