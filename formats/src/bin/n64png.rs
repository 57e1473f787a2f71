use {
    anyhow::{Result as Anyhow, Context},
    camino::Utf8Path as Path,
    formats::Config,
};

const USAGE: &str = "usage: n64png [-v|-vv|-q] [--truncate] [--raw] <title>.<W>x<H>.<format>[y]...";

fn main() {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) if config.output.is_none() => config,
        Ok(_) => {
            eprintln!("-o is not supported; images are written beside their inputs\n{USAGE}");
            std::process::exit(2);
        }
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
        if let Err(e) = convert(input, &config) {
            log::error!("{input}: {e:#}");
            failed += 1;
        }
    }

    if failed != 0 {
        log::error!("{failed} of {} textures failed", config.inputs.len());
        std::process::exit(1);
    }
}

fn convert(input: &Path, config: &Config) -> Anyhow<()> {
    let texture = formats::load_texture(input, config.overshoot)?;

    if config.keep_raw {
        let raw_path = texture.name.raw_path();
        std::fs::write(&raw_path, &texture.raw).with_context(|| format!("writing {raw_path}"))?;
        log::info!("wrote {raw_path}");
    }

    let png_path = texture.name.png_path();
    texture.image.save(&png_path).with_context(|| format!("writing {png_path}"))?;
    log::info!("wrote {png_path}");
    Ok(())
}
