use std::io::Write;

use{
    super::parser::*,
    serde_json::Value,
    anyhow::Context,
    rand_pcg::Pcg64,
    net_ensembles::rand::SeedableRng,
    crate::{error::SirError, sir_model::*},
};

/// Seeds, immunizes and runs once
pub fn run_once(param: &SimulateParams, network: &ContactNetwork) -> Result<(Vec<usize>, Trajectory), SirError>
{
    let mut vaccine_rng = Pcg64::seed_from_u64(param.vaccine_seed);
    let immunized = param.immunization
        .select(network, &param.initial_infected, &mut vaccine_rng)?;

    let model = SirModel::new(network, param.sir_params())?;
    let mut sir_rng = Pcg64::seed_from_u64(param.sir_seed);
    let trajectory = model.run(&param.initial_infected, &immunized, &mut sir_rng)?;
    Ok((immunized, trajectory))
}

pub fn execute_simulation(param: SimulateParams, json: Value, allow_empty_seed: bool) -> anyhow::Result<()>
{
    if param.initial_infected.is_empty() && !allow_empty_seed{
        return Err(SirError::EmptyInitialInfectionSet.into());
    }
    let network = param.network.build()?;
    let (immunized, trajectory) = run_once(&param, &network)?;

    log::info!("immunized nodes: {:?}", immunized);
    log::info!(
        "epidemic lasted {} steps, peak {} infected, {} ever infected",
        trajectory.duration(),
        trajectory.peak_infected(),
        trajectory.ever_infected()
    );

    write_outputs(&param.quick_name(), &json, &trajectory, param.save_trajectory)
}

/// `<name>_i.curves`, `<name>.states` and, if requested, `<name>.bincode`
pub fn write_outputs(name: &str, json: &Value, trajectory: &Trajectory, save_trajectory: bool) -> anyhow::Result<()>
{
    let mut writer = TrajectoryWriter::new(name)
        .context("unable to create output files")?;
    writer.write_header(std::slice::from_ref(json))?;
    writer.write_trajectory(trajectory)?;

    if save_trajectory{
        let path = format!("{name}.bincode");
        let mut file = create_writer(&path)
            .with_context(|| format!("unable to create {path}"))?;
        bincode::serialize_into(&mut file, trajectory)
            .context("unable to store trajectory")?;
        file.flush()
            .with_context(|| format!("unable to write {path}"))?;
    }
    Ok(())
}
