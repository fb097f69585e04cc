use thiserror::Error;

/// Everything that can go wrong before (or instead of) a finished SIR run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SirError {
    /// beta or gamma outside of [0, 1]
    #[error("{name} = {value} is not a probability, expected a value in [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("edge ({u}, {v}) has weight {weight}, expected a value in (0, 1]")]
    InvalidEdgeWeight { u: usize, v: usize, weight: f64 },

    /// Weight to distance transform produced something dijkstra can't use
    #[error("edge ({u}, {v}) with weight {weight} maps to distance {distance}")]
    InvalidDistance { u: usize, v: usize, weight: f64, distance: f64 },

    #[error("cannot add edge ({u}, {v}): {reason}")]
    InvalidEdge { u: usize, v: usize, reason: String },

    #[error("node {node} does not exist, the network has {node_count} nodes")]
    UnknownNode { node: usize, node_count: usize },

    #[error("no initially infected node given")]
    EmptyInitialInfectionSet,

    #[error("cannot generate {graph} network: {reason}")]
    InvalidGraphType { graph: String, reason: String },

    #[error("no connected network found after {attempts} randomizations")]
    Disconnected { attempts: u32 },

    #[error("still infected nodes after {max_steps} steps, is gamma > 0?")]
    NonTerminating { max_steps: usize },
}

/// Checks that `value` can be used as a per step probability
pub fn check_probability(name: &'static str, value: f64) -> Result<f64, SirError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SirError::InvalidProbability { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_bounds() {
        assert_eq!(check_probability("beta", 0.0), Ok(0.0));
        assert_eq!(check_probability("beta", 1.0), Ok(1.0));
        assert!(check_probability("gamma", -0.1).is_err());
        assert!(check_probability("gamma", 1.000_1).is_err());
        // NaN is not contained in any range
        assert!(check_probability("gamma", f64::NAN).is_err());
    }
}
