use{
    std::{fs::File, io::BufReader, path::Path},
    serde::{Serialize, de::DeserializeOwned},
    serde_json::Value,
    anyhow::Context,
};

/// Reads the parameters from the json file.
/// Without a file the default parameters are printed as example and the program exits.
pub fn parse<P>(file: Option<&String>) -> anyhow::Result<(P, Value)>
where P: Serialize + DeserializeOwned + Default
{
    match file{
        None => {
            let example = P::default();
            serde_json::to_writer_pretty(std::io::stdout(), &example)
                .context("unable to print example json")?;
            println!();
            std::process::exit(0)
        },
        Some(path) => parse_from_file(path)
    }
}

pub fn parse_from_file<P, F>(path: F) -> anyhow::Result<(P, Value)>
where P: DeserializeOwned,
    F: AsRef<Path>
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("unable to open {}", path.display()))?;
    let json: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not valid json", path.display()))?;
    let param: P = serde_json::from_value(json.clone())
        .with_context(|| format!("{} does not contain the expected parameters", path.display()))?;
    Ok((param, json))
}
