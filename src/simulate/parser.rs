use{
    super::*,
    structopt::StructOpt,
    std::num::*,
    crate::json_parsing::*,
    serde::{Serialize, Deserialize},
    serde_json::Value,
    crate::misc_types::*,
    crate::sir_model::*,
    crate::immunization_methods::*,
};

#[derive(Debug, StructOpt, Clone)]
/// Run a single seeded epidemic and write its trajectory
pub struct Simulate
{
    /// Specify the json file with the options
    /// If not given, an example json will be printed
    #[structopt(long)]
    json: Option<String>,

    /// Accept an empty list of initially infected nodes
    #[structopt(long)]
    allow_empty_seed: bool,
}

impl Simulate {
    pub fn parse(&self) -> anyhow::Result<(SimulateParams, Value)>
    {
        parse(self.json.as_ref())
    }

    pub fn execute(&self) -> anyhow::Result<()>
    {
        let (param, json) = self.parse()?;
        execute_simulation(param, json, self.allow_empty_seed)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SimulateParams
{
    pub network: NetworkOptions,
    pub trans_prob: f64,
    pub recovery_prob: f64,
    pub initial_infected: Vec<usize>,
    pub immunization: ImmunizationStrategy,
    pub sir_seed: u64,
    pub vaccine_seed: u64,
    pub max_steps: Option<NonZeroUsize>,
    /// also store the trajectory as bincode
    pub save_trajectory: bool,
}

impl SimulateParams
{
    pub fn sir_params(&self) -> SirParams
    {
        SirParams{
            beta: self.trans_prob,
            gamma: self.recovery_prob,
            max_steps: self.max_steps
        }
    }

    pub fn quick_name(&self) -> String
    {
        format!(
            "v{}Sim_{}_T{}R{}InInf{}Imm{}SS{}VS{}",
            crate::VERSION,
            self.network.name(),
            self.trans_prob,
            self.recovery_prob,
            self.initial_infected.len(),
            self.immunization.name(),
            self.sir_seed,
            self.vaccine_seed
        )
    }
}

impl Default for SimulateParams
{
    fn default() -> Self {
        Self{
            network: NetworkOptions::default(),
            trans_prob: DEFAULT_TRANS_PROB,
            recovery_prob: DEFAULT_RECOVERY_PROB,
            initial_infected: vec![0],
            immunization: ImmunizationStrategy::Closeness(DEFAULT_VACCINE_DOSES),
            sir_seed: DEFAULT_SIR_SEED,
            vaccine_seed: DEFAULT_VACCINE_SEED,
            max_steps: None,
            save_trajectory: false
        }
    }
}
