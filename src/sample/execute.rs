use std::io::Write;

use{
    super::parser::*,
    serde_json::Value,
    anyhow::Context,
    indicatif::ProgressBar,
    rand::Rng,
    rand_pcg::Pcg64,
    net_ensembles::rand::SeedableRng,
    crate::{
        error::SirError,
        sir_model::*,
        stats_methods::*,
    },
};

/// Per run measurements, index = run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleResult
{
    pub durations: Vec<u32>,
    pub peaks: Vec<u32>,
    pub ever_infected: Vec<u32>,
    pub curves: Vec<Vec<usize>>,
}

impl SampleResult
{
    fn push(&mut self, trajectory: Trajectory)
    {
        self.durations.push(trajectory.duration() as u32);
        self.peaks.push(trajectory.peak_infected() as u32);
        self.ever_infected.push(trajectory.ever_infected() as u32);
        let (counts, _) = trajectory.into_parts();
        self.curves.push(counts);
    }

    pub fn len(&self) -> usize
    {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.durations.is_empty()
    }
}

/// Runs `param.samples` epidemics one after another.
///
/// Every run gets its own generator seeded from the master `sir_seed` stream.
/// Random immunization is redrawn per run, the other strategies are selected once.
pub fn sample_outbreaks(
    param: &SampleParams,
    network: &ContactNetwork,
    bar: Option<&ProgressBar>
) -> Result<SampleResult, SirError>
{
    let model = SirModel::new(network, param.sir_params())?;
    let mut sir_rng = Pcg64::seed_from_u64(param.sir_seed);
    let mut vaccine_rng = Pcg64::seed_from_u64(param.vaccine_seed);

    let fixed = if param.immunization.is_random(){
        None
    } else {
        Some(param.immunization.select(network, &param.initial_infected, &mut vaccine_rng)?)
    };

    let mut result = SampleResult::default();
    for _ in 0..param.samples
    {
        let redrawn;
        let immunized = match &fixed{
            Some(list) => list,
            None => {
                redrawn = param.immunization.select(network, &param.initial_infected, &mut vaccine_rng)?;
                &redrawn
            }
        };
        let mut run_rng = Pcg64::seed_from_u64(sir_rng.gen());
        let trajectory = model.run(&param.initial_infected, immunized, &mut run_rng)?;
        result.push(trajectory);
        if let Some(bar) = bar{
            bar.inc(1);
        }
    }
    Ok(result)
}

pub fn execute_sampling(param: SampleParams, json: Value) -> anyhow::Result<()>
{
    if param.initial_infected.is_empty(){
        return Err(SirError::EmptyInitialInfectionSet.into());
    }
    let network = param.network.build()?;

    let bar = crate::indication_bar(param.samples as u64);
    let result = sample_outbreaks(&param, &network, Some(&bar))?;
    bar.finish_with_message("Done");

    let n = Some(network.vertex_count() as f64);
    let duration = MyVariance::from_slice(&result.durations, None);
    let peak = MyVariance::from_slice(&result.peaks, n);
    let ever = MyVariance::from_slice(&result.ever_infected, n);
    log::info!("duration: mean {} variance {}", duration.mean(), duration.variance());
    log::info!("peak fraction: mean {} variance {}", peak.mean(), peak.variance());
    log::info!("ever infected fraction: mean {} variance {}", ever.mean(), ever.variance());

    let name = param.quick_name();
    write_samples(&name, &json, &result, [&duration, &peak, &ever])?;
    write_mean_curve(&name, &json, &result)?;
    Ok(())
}

fn write_samples(name: &str, json: &Value, result: &SampleResult, stats: [&MyVariance; 3]) -> anyhow::Result<()>
{
    let path = format!("{name}.samples");
    let mut buf = create_writer(&path)
        .with_context(|| format!("unable to create {path}"))?;
    write_jsons(std::slice::from_ref(json), &mut buf)?;
    let [duration, peak, ever] = stats;
    writeln!(buf, "#duration mean {} var {}", duration.mean(), duration.variance())?;
    writeln!(buf, "#peak_fraction mean {} var {}", peak.mean(), peak.variance())?;
    writeln!(buf, "#ever_infected_fraction mean {} var {}", ever.mean(), ever.variance())?;
    writeln!(buf, "#duration peak ever_infected")?;
    for i in 0..result.len(){
        writeln!(
            buf,
            "{} {} {}",
            result.durations[i],
            result.peaks[i],
            result.ever_infected[i]
        )?;
    }
    buf.flush()?;
    Ok(())
}

fn write_mean_curve(name: &str, json: &Value, result: &SampleResult) -> anyhow::Result<()>
{
    let path = format!("{name}_mean.curves");
    let mut buf = create_writer(&path)
        .with_context(|| format!("unable to create {path}"))?;
    write_jsons(std::slice::from_ref(json), &mut buf)?;
    writeln!(buf, "#time mean_infected")?;
    for (time, mean) in mean_curve(&result.curves).into_iter().enumerate(){
        write_pair(&mut buf, time + 1, mean)?;
    }
    buf.flush()?;
    Ok(())
}
