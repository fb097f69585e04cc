use {
    serde::{Serialize, Deserialize},
    net_ensembles::Node
};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy)]
#[derive(Serialize, Deserialize)]
pub enum HealthState{
    Susceptible,
    Infected,
    Recovered,
}

impl HealthState{
    pub fn sus_check(&self) -> bool{
        matches!(self, HealthState::Susceptible)
    }
    pub fn inf_check(&self) -> bool{
        matches!(self, HealthState::Infected)
    }
    pub fn rec_check(&self) -> bool{
        matches!(self, HealthState::Recovered)
    }

    pub fn is_or_was_infected(&self) -> bool
    {
        matches!(self, Self::Infected | Self::Recovered)
    }

    /// Single letter used in the `.states` output
    pub fn symbol(&self) -> char
    {
        match self{
            Self::Susceptible => 'S',
            Self::Infected => 'I',
            Self::Recovered => 'R'
        }
    }

    /// S -> I -> R, staying put is always allowed
    pub fn may_become(&self, next: HealthState) -> bool
    {
        matches!(
            (self, next),
            (Self::Susceptible, _)
            | (Self::Infected, Self::Infected | Self::Recovered)
            | (Self::Recovered, Self::Recovered)
        )
    }
}

impl Default for HealthState{
    fn default() -> Self{
        HealthState::Susceptible
    }
}

/// Vertex payload of the contact network.
/// The health states live in the snapshots, not in the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub struct Individual;

impl Node for Individual{
    fn new_from_index(_index: usize) -> Self{
        Individual
    }
}
