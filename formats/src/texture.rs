use {
    anyhow::{Result as Anyhow, anyhow, bail},
    bytemuck::pod_read_unaligned as read,
    image::RgbaImage,
    yay0::be::Be,
};

/// Texel formats as the N64 RDP knows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Rgba16,
    Rgba32,
    Ci4,
    Ci8,
    Ia4,
    Ia8,
    Ia16,
    I4,
    I8,
}

impl Format {
    pub fn bits(self) -> usize {
        match self {
            Format::Ci4  | Format::Ia4 | Format::I4 => 4,
            Format::Ci8  | Format::Ia8 | Format::I8 => 8,
            Format::Ia16 | Format::Rgba16           => 16,
            Format::Rgba32                          => 32,
        }
    }

    pub fn is_indexed(self) -> bool {
        matches!(self, Format::Ci4 | Format::Ci8)
    }
}

impl std::str::FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Anyhow<Self> {
        Ok(match s {
            "rgba16" | "c16" => Format::Rgba16,
            "rgba32" | "c32" => Format::Rgba32,
            "ci4"  => Format::Ci4,
            "ci8"  => Format::Ci8,
            "ia4"  => Format::Ia4,
            "ia8"  => Format::Ia8,
            "ia16" => Format::Ia16,
            "i4"   => Format::I4,
            "i8"   => Format::I8,
            _ => bail!("unknown texture format {s:?}"),
        })
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Format::Rgba16 => "rgba16",
            Format::Rgba32 => "rgba32",
            Format::Ci4    => "ci4",
            Format::Ci8    => "ci8",
            Format::Ia4    => "ia4",
            Format::Ia8    => "ia8",
            Format::Ia16   => "ia16",
            Format::I4     => "i4",
            Format::I8     => "i8",
        })
    }
}

/// 5 bits each of red, green and blue over a 1 bit alpha.
pub fn rgba5551(bits: u16) -> [u8; 4] {
    let chan = |i: u16| {
        let y = ((bits >> i) & 0x1f) as u8;
        y << 3 | y >> 2
    };
    let a = if bits & 1 != 0 {0xff} else {0x00};
    [chan(11), chan(6), chan(1), a]
}

fn nibbles(row: &[u8]) -> impl Iterator<Item = u8> + '_ {
    row.iter().flat_map(|&b| [b >> 4, b & 0xf])
}

fn ia4(nibble: u8) -> [u8; 4] {
    let i = nibble & 0xe;
    let i = i | i << 4;
    let a = if nibble & 1 != 0 {0xff} else {0x00};
    [i, i, i, a]
}

pub fn load_palette(pal: &[u8]) -> Vec<[u8; 4]> {
    pal.chunks_exact(2)
        .map(|c| rgba5551(read::<Be<u16>>(c).get()))
        .collect()
}

/// Expands raw texels into an RGBA image.
///
/// Rows are packed to whole bytes, so odd-width 4 bit textures carry a
/// padding nibble at the end of each row. Bytes past the last row are
/// ignored.
pub fn to_rgba(
    format: Format,
    texels: &[u8],
    palette: Option<&[u8]>,
    wide: u32,
    high: u32,
) -> Anyhow<RgbaImage>
{
    if wide == 0 || high == 0 {bail!("{format} texture has a zero dimension")}

    let stride = (wide as usize * format.bits()).div_ceil(8);
    let need = stride * high as usize;
    if texels.len() < need {
        bail!("truncated {format} texture: {wide}x{high} needs {need} bytes, got {}", texels.len());
    }
    if texels.len() > need {
        log::debug!("ignoring {} bytes past the end of a {wide}x{high} texture", texels.len() - need);
    }

    let palette = match (format.is_indexed(), palette) {
        (true, Some(pal)) => load_palette(pal),
        (true, None) => bail!("{format} texture needs a palette"),
        (false, _) => Vec::new(),
    };
    let lookup = |i: u8| palette.get(i as usize).copied()
        .ok_or_else(|| anyhow!("palette index {i} out of range ({} entries)", palette.len()));

    let mut rgba = Vec::with_capacity(wide as usize * high as usize * 4);
    for row in texels[..need].chunks_exact(stride) {
        let row: Vec<[u8; 4]> = match format {
            Format::Rgba16 => row.chunks_exact(2)
                .map(|c| rgba5551(read::<Be<u16>>(c).get()))
                .collect(),
            Format::Rgba32 => row.chunks_exact(4).map(read::<[u8; 4]>).collect(),
            Format::Ci4  => nibbles(row).map(lookup).collect::<Anyhow<_>>()?,
            Format::Ci8  => row.iter().map(|&i| lookup(i)).collect::<Anyhow<_>>()?,
            Format::Ia4  => nibbles(row).map(ia4).collect(),
            Format::Ia8  => row.iter()
                .map(|&b| {
                    let i = (b >> 4) * 0x11;
                    [i, i, i, (b & 0xf) * 0x11]
                })
                .collect(),
            Format::Ia16 => row.chunks_exact(2).map(|c| [c[0], c[0], c[0], c[1]]).collect(),
            Format::I4   => nibbles(row).map(|n| [n * 0x11, n * 0x11, n * 0x11, 0xff]).collect(),
            Format::I8   => row.iter().map(|&i| [i, i, i, 0xff]).collect(),
        };
        rgba.extend(row.into_iter().take(wide as usize).flatten());
    }

    RgbaImage::from_raw(wide, high, rgba)
        .ok_or_else(|| anyhow!("{format} texture did not fill {wide}x{high}"))
}
