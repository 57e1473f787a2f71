//! Nintendo 64 asset formats: Yay0 containers and raw texel dumps.

pub mod config;
pub mod name;
pub mod texture;

pub use {config::Config, name::TextureName, texture::Format};

use {
    std::borrow::Cow,
    anyhow::{Result as Anyhow, Context},
    camino::Utf8Path as Path,
    image::RgbaImage,
    yay0::Overshoot,
};

pub struct Texture {
    pub name: TextureName,
    /// Texel bytes after decompression.
    pub raw: Vec<u8>,
    pub image: RgbaImage,
}

/// Reads a file and undoes its Yay0 compression, if it has any.
pub fn read_decoded(path: &Path, overshoot: Overshoot) -> Anyhow<Vec<u8>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {path}"))?;
    decode_bytes(path, bytes, overshoot)
}

fn decode_bytes(path: &Path, bytes: Vec<u8>, overshoot: Overshoot) -> Anyhow<Vec<u8>> {
    let decoded = match yay0::decode_if_compressed_with(&bytes, overshoot)
        .with_context(|| format!("decoding {path}"))?
    {
        Cow::Owned(decoded) => Some(decoded),
        Cow::Borrowed(_) => None,
    };
    let Some(decoded) = decoded else {return Ok(bytes)};
    log::debug!("{path}: yay0 {} -> {} bytes", bytes.len(), decoded.len());
    Ok(decoded)
}

pub fn load_texture(path: &Path, overshoot: Overshoot) -> Anyhow<Texture> {
    let name = TextureName::parse(path)?;
    log::info!("loading {path}: {}x{} {}", name.wide, name.high, name.format);

    let bytes = std::fs::read(path).with_context(|| format!("reading {path}"))?;
    if name.compressed && !yay0::is_yay0(&bytes) {
        log::warn!("{path} is named as compressed but has no yay0 magic");
    }
    let raw = decode_bytes(path, bytes, overshoot)?;

    let palette = if name.format.is_indexed() {
        let pal_path = name.palette_path();
        log::debug!("palette: {pal_path}");
        Some(read_decoded(&pal_path, overshoot)?)
    }
    else {
        None
    };

    let image = texture::to_rgba(name.format, &raw, palette.as_deref(), name.wide, name.high)
        .with_context(|| format!("converting {path}"))?;
    Ok(Texture{name, raw, image})
}

pub fn log_init(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    use simplelog::{ColorChoice, TermLogger, TerminalMode};
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}
