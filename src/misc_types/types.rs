use{
    serde::{Serialize, Deserialize},
    std::num::*,
    rand::{Rng, seq::SliceRandom},
    crate::{sir_model::DEFAULT_WEIGHT, error::SirError},
};

pub const DEFAULT_SYSTEM_SIZE: NonZeroUsize = unsafe{NonZeroUsize::new_unchecked(70)};
pub const DEFAULT_EDGE_PROB: f64 = 0.085;
pub const DEFAULT_TRANS_PROB: f64 = 0.7;
pub const DEFAULT_RECOVERY_PROB: f64 = 0.4;
pub const DEFAULT_GRAPH_SEED: u64 = 14;
pub const DEFAULT_WEIGHT_SEED: u64 = 875629289;
pub const DEFAULT_SIR_SEED: u64 = 1489264107025;
pub const DEFAULT_VACCINE_SEED: u64 = 4896709264107025;
pub const DEFAULT_VACCINE_DOSES: usize = 10;
pub const DEFAULT_SAMPLES: usize = 1000;

/// contact weights with social distancing: casual, community, work, household
pub const DISTANCING_WEIGHTS: [f64; 4] = [0.1, 0.3, 0.5, 0.9];
/// contact weights without social distancing
pub const NO_DISTANCING_WEIGHTS: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// a small world ring connects every node to its 2 nearest neighbors on each side
pub const MIN_SMALL_WORLD_SIZE: usize = 5;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum GraphType{
    /// every pair of nodes is connected with this probability
    ErdosRenyi(f64),
    /// rewire probability
    SmallWorld(f64),
    /// m, source_n
    Barabasi(usize, usize),
}

impl GraphType{
    pub fn name(&self) -> String
    {
        match self
        {
            Self::ErdosRenyi(p) => format!("er{}", p),
            Self::SmallWorld(p) => format!("sw{}", p),
            Self::Barabasi(q, r) => format!("ba{}{}", q, r),
        }
    }

    /// Rejects parameters the ensembles can't generate `system_size` nodes from
    pub fn check(&self, system_size: usize) -> Result<(), SirError>
    {
        let invalid = |reason: String| Err(
            SirError::InvalidGraphType{graph: self.name(), reason}
        );
        match *self
        {
            Self::ErdosRenyi(p) | Self::SmallWorld(p) if !(0.0..=1.0).contains(&p) => {
                invalid(format!("probability {p} is not in [0, 1]"))
            },
            Self::SmallWorld(_) if system_size < MIN_SMALL_WORLD_SIZE => {
                invalid(format!("needs at least {MIN_SMALL_WORLD_SIZE} nodes, got {system_size}"))
            },
            Self::Barabasi(m, _) if m == 0 => {
                invalid("every new node needs at least one edge".to_owned())
            },
            Self::Barabasi(m, source_n) if source_n <= m => {
                invalid(format!("source network of {source_n} nodes is too small for m = {m}"))
            },
            Self::Barabasi(_, source_n) if source_n > system_size => {
                invalid(format!("source network of {source_n} nodes is larger than the system size {system_size}"))
            },
            _ => Ok(())
        }
    }
}

/// How transmission weights are put on the generated edges
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum WeightScheme{
    Unweighted,
    /// each edge picks one of these uniformly
    Choice(Vec<f64>),
}

impl WeightScheme{
    pub fn distancing() -> Self
    {
        Self::Choice(DISTANCING_WEIGHTS.to_vec())
    }

    pub fn no_distancing() -> Self
    {
        Self::Choice(NO_DISTANCING_WEIGHTS.to_vec())
    }

    /// An empty choice list behaves like `Unweighted`
    pub fn draw<R: Rng>(&self, rng: &mut R) -> f64
    {
        match self{
            Self::Unweighted => DEFAULT_WEIGHT,
            Self::Choice(values) => values.choose(rng)
                .copied()
                .unwrap_or(DEFAULT_WEIGHT)
        }
    }

    pub fn name(&self) -> String
    {
        match self{
            Self::Unweighted => "unw".to_owned(),
            Self::Choice(values) => {
                let list: Vec<_> = values.iter().map(|v| v.to_string()).collect();
                format!("w{}", list.join("-"))
            }
        }
    }
}

impl Default for WeightScheme{
    fn default() -> Self{
        Self::distancing()
    }
}
