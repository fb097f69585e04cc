use{
    std::{
        time::Instant
    },
    structopt::StructOpt,
    indicatif::*
};

pub mod error;
pub mod sir_model;
pub mod immunization_methods;
pub mod misc_types;
pub mod stats_methods;
pub mod json_parsing;
pub mod simulate;
pub mod sample;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let start_time = Instant::now();
    let opt = CmdOption::from_args();
    let res = match opt{
        CmdOption::Simulate(o) => o.execute(),
        CmdOption::Sample(o) => o.execute(),
    };
    println!("Execution took {}", humantime::format_duration(start_time.elapsed()));
    if let Err(e) = res{
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

pub fn indication_bar(len: u64) -> ProgressBar
{
        // for indication on when it is finished
        let bar = ProgressBar::new(len);
        bar.set_style(ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise} - {eta_precise}] {wide_bar}"));
        bar
}


#[derive(Debug, StructOpt, Clone)]
#[structopt(about = "SIR epidemics on weighted contact networks with immunization")]
pub enum CmdOption
{
    Simulate(simulate::Simulate),
    Sample(sample::Sample),
}
