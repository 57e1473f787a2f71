use {
    anyhow::{Result as Anyhow, bail},
    camino::{Utf8Path as Path, Utf8PathBuf as PathBuf},
    yay0::Overshoot,
};

/// Command line settings shared by the tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub level: log::LevelFilter,
    pub overshoot: Overshoot,
    pub keep_raw: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            inputs: Vec::new(),
            output: None,
            level: log::LevelFilter::Info,
            overshoot: Overshoot::Reject,
            keep_raw: false,
        }
    }
}

impl Config {
    /// Parses arguments, not including the program name.
    pub fn from_args<I>(args: I) -> Anyhow<Self> where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();
        let mut flags = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--" if flags => flags = false,
                "-v"  if flags => config.level = config.level.max(log::LevelFilter::Debug),
                "-vv" if flags => config.level = log::LevelFilter::Trace,
                "-q"  if flags => config.level = log::LevelFilter::Warn,
                "--truncate" if flags => config.overshoot = Overshoot::Truncate,
                "--raw" if flags => config.keep_raw = true,
                "-o" if flags => {
                    let Some(out) = args.next() else {bail!("-o needs a path")};
                    config.output = Some(out.into());
                }
                flag if flags && flag.starts_with('-') => bail!("unknown option {flag}"),
                input => config.inputs.push(input.into()),
            }
        }

        if config.inputs.is_empty() {bail!("no input files")}
        if config.output.is_some() && config.inputs.len() > 1 {
            bail!("-o only makes sense with a single input");
        }
        Ok(config)
    }

    /// Where the decoded bytes of `input` go: `-o` if given, else the input
    /// with a `.raw` extension, or `.dec.raw` if the input is a `.raw` itself.
    pub fn output_for(&self, input: &Path) -> Anyhow<PathBuf> {
        let output = match &self.output {
            Some(output) => output.clone(),
            None if input.extension() == Some("raw") => input.with_extension("dec.raw"),
            None => input.with_extension("raw"),
        };
        if output.as_path() == input {bail!("refusing to overwrite input {input}")}
        Ok(output)
    }
}
