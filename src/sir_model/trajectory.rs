use{
    std::ops::Deref,
    serde::{Serialize, Deserialize},
    super::*
};

/// Health state of every node at one time step, indexed by node.
/// Once handed to a [Trajectory] a snapshot is never changed again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState{
    states: Vec<HealthState>
}

impl Deref for SimulationState
{
    type Target = [HealthState];
    fn deref(&self) -> &Self::Target {
        &self.states
    }
}

impl From<Vec<HealthState>> for SimulationState{
    fn from(states: Vec<HealthState>) -> Self{
        Self{states}
    }
}

impl SimulationState{
    /// everyone susceptible
    pub fn new(node_count: usize) -> Self
    {
        Self{states: vec![HealthState::Susceptible; node_count]}
    }

    pub fn state(&self, node: usize) -> HealthState
    {
        self.states[node]
    }

    pub(crate) fn set(&mut self, node: usize, state: HealthState)
    {
        self.states[node] = state;
    }

    pub fn count(&self, state: HealthState) -> usize
    {
        self.states.iter()
            .filter(|&&s| s == state)
            .count()
    }

    pub fn infected_count(&self) -> usize
    {
        self.count(HealthState::Infected)
    }

    pub fn has_infected(&self) -> bool
    {
        self.states.iter().any(HealthState::inf_check)
    }

    /// (S, I, R)
    pub fn sir_counts(&self) -> (usize, usize, usize)
    {
        let mut s = 0;
        let mut i = 0;
        let mut r = 0;
        self.states.iter()
            .for_each(
                |state|
                match state{
                    HealthState::Susceptible => s += 1,
                    HealthState::Infected => i += 1,
                    HealthState::Recovered => r += 1
                }
            );
        (s, i, r)
    }

    /// e.g. "SIRS" for four nodes
    pub fn symbols(&self) -> String
    {
        self.states.iter().map(HealthState::symbol).collect()
    }
}

/// Result of one finished run.
///
/// `snapshots[t]` is the state before step `t`, the last snapshot is the terminal
/// state without infected nodes. `infection_counts[t]` is the number of infected
/// nodes after step `t`, so there is always one snapshot more than counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trajectory{
    snapshots: Vec<SimulationState>,
    infection_counts: Vec<usize>
}

impl Trajectory{
    pub(crate) fn new(snapshots: Vec<SimulationState>, infection_counts: Vec<usize>) -> Self
    {
        debug_assert_eq!(snapshots.len(), infection_counts.len() + 1);
        Self{snapshots, infection_counts}
    }

    pub fn snapshots(&self) -> &[SimulationState]
    {
        &self.snapshots
    }

    pub fn infection_counts(&self) -> &[usize]
    {
        &self.infection_counts
    }

    pub fn initial(&self) -> &SimulationState
    {
        &self.snapshots[0]
    }

    pub fn terminal(&self) -> &SimulationState
    {
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// number of steps until extinction
    pub fn duration(&self) -> usize
    {
        self.infection_counts.len()
    }

    /// Maximum of simultaneously infected nodes, including the initial state
    pub fn peak_infected(&self) -> usize
    {
        self.infection_counts.iter()
            .copied()
            .chain(std::iter::once(self.initial().infected_count()))
            .max()
            .unwrap_or(0)
    }

    /// Nodes that have been infected at some point.
    /// Immunized nodes start as recovered and are not counted
    pub fn ever_infected(&self) -> usize
    {
        self.initial()
            .iter()
            .zip(self.terminal().iter())
            .filter(|(first, last)| !first.rec_check() && last.is_or_was_infected())
            .count()
    }

    pub fn into_parts(self) -> (Vec<usize>, Vec<SimulationState>)
    {
        (self.infection_counts, self.snapshots)
    }
}
