use {
    crate::texture::Format,
    anyhow::{Result as Anyhow, Context, anyhow},
    camino::{Utf8Path as Path, Utf8PathBuf as PathBuf},
};

/// Textures are named `<title>.<wide>x<high>.<format>`, with a trailing `y`
/// on the format when the file is Yay0 compressed (`game_over.256x32.ci8y`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureName {
    pub dir: PathBuf,
    pub title: String,
    pub wide: u32,
    pub high: u32,
    pub format: Format,
    pub compressed: bool,
}

impl TextureName {
    pub fn parse(path: &Path) -> Anyhow<Self> {
        let file_name = path.file_name()
            .ok_or_else(|| anyhow!("{path} has no file name"))?;
        let bad = || anyhow!("{file_name} is not named <title>.<W>x<H>.<format>");

        let (rest, ext) = file_name.rsplit_once('.').ok_or_else(bad)?;
        let (title, dims) = rest.rsplit_once('.').ok_or_else(bad)?;
        let (wide, high) = dims.split_once('x').ok_or_else(bad)?;
        let wide = wide.parse().with_context(|| format!("bad width in {file_name}"))?;
        let high = high.parse().with_context(|| format!("bad height in {file_name}"))?;

        let (ext, compressed) = match ext.strip_suffix('y') {
            Some(ext) => (ext, true),
            None      => (ext, false),
        };
        let format = ext.parse()?;

        let dir = path.parent().unwrap_or(Path::new("")).to_owned();
        Ok(TextureName{dir, title: title.to_owned(), wide, high, format, compressed})
    }

    /// Palettes sit beside their texture, named after its title alone.
    pub fn palette_path(&self) -> PathBuf {
        self.dir.join(format!("{}.pal", self.title))
    }

    pub fn png_path(&self) -> PathBuf {
        self.sibling("png")
    }

    pub fn raw_path(&self) -> PathBuf {
        self.sibling("raw")
    }

    fn sibling(&self, ext: &str) -> PathBuf {
        self.dir.join(format!("{}.{}x{}.{ext}", self.title, self.wide, self.high))
    }
}
