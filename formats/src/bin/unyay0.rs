use {
    anyhow::{Result as Anyhow, Context},
    camino::Utf8Path as Path,
    formats::Config,
};

const USAGE: &str = "usage: unyay0 [-v|-vv|-q] [--truncate] <input>... [-o <output>]";

fn main() {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            std::process::exit(2);
        }
    };
    if let Err(e) = formats::log_init(config.level) {
        eprintln!("unable to install logger: {e}");
    }

    let mut failed = 0;
    for input in &config.inputs {
        if let Err(e) = unpack(input, &config) {
            log::error!("{input}: {e:#}");
            failed += 1;
        }
    }

    if failed != 0 {
        log::error!("{failed} of {} files failed", config.inputs.len());
        std::process::exit(1);
    }
}

fn unpack(input: &Path, config: &Config) -> Anyhow<()> {
    let output = config.output_for(input)?;
    let bytes = std::fs::read(input).with_context(|| format!("reading {input}"))?;
    if !yay0::is_yay0(&bytes) {
        log::warn!("{input}: no yay0 magic, decoding anyway");
    }

    let decoded = yay0::decode_with(&bytes, config.overshoot)?;
    std::fs::write(&output, &decoded).with_context(|| format!("writing {output}"))?;
    log::info!("{input} -> {output}: {} -> {} bytes", bytes.len(), decoded.len());
    Ok(())
}
