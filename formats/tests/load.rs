use {
    camino::Utf8PathBuf as PathBuf,
    formats::{load_texture, read_decoded, Format},
    yay0::{Overshoot, MAGIC},
};

fn scratch_dir(test: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(test);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Literal-only container: every mask bit set, one texel per bit.
fn stored(data: &[u8]) -> Vec<u8> {
    let words = data.len().div_ceil(32);
    let link_table = (16 + words * 4) as u32;
    let mut out = MAGIC.to_vec();
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(&link_table.to_be_bytes());
    out.extend_from_slice(&link_table.to_be_bytes());
    out.extend(std::iter::repeat(0xff).take(words * 4));
    out.extend_from_slice(data);
    out
}

#[test]
fn compressed_ci8_with_palette() {
    let dir = scratch_dir("compressed_ci8_with_palette");
    let texels = [0, 1, 1, 0, 2, 2];
    let palette = [0x00, 0x00, 0xf8, 0x01, 0x07, 0xc1];
    std::fs::write(dir.join("logo.3x2.ci8y"), stored(&texels)).unwrap();
    std::fs::write(dir.join("logo.pal"), palette).unwrap();

    let texture = load_texture(&dir.join("logo.3x2.ci8y"), Overshoot::Reject).unwrap();
    assert_eq!(texture.name.format, Format::Ci8);
    assert_eq!(texture.raw, texels);
    assert_eq!(texture.image.dimensions(), (3, 2));
    assert_eq!(texture.image.get_pixel(1, 0).0, [0xff, 0x00, 0x00, 0xff]);
    assert_eq!(texture.image.get_pixel(2, 1).0, [0x00, 0xff, 0x00, 0xff]);
    assert_eq!(texture.name.png_path(), dir.join("logo.3x2.png"));
}

#[test]
fn uncompressed_passes_through() {
    let dir = scratch_dir("uncompressed_passes_through");
    let path = dir.join("grey.2x2.i8");
    std::fs::write(&path, [10, 20, 30, 40]).unwrap();

    assert_eq!(read_decoded(&path, Overshoot::Reject).unwrap(), [10, 20, 30, 40]);
    let texture = load_texture(&path, Overshoot::Reject).unwrap();
    assert_eq!(texture.image.get_pixel(1, 1).0, [40, 40, 40, 0xff]);
}

#[test]
fn missing_palette_fails() {
    let dir = scratch_dir("missing_palette_fails");
    let path = dir.join("nopal.2x1.ci4");
    std::fs::write(&path, [0x01]).unwrap();
    let err = load_texture(&path, Overshoot::Reject).err().unwrap();
    assert!(format!("{err:#}").contains("nopal.pal"), "{err:#}");
}

#[test]
fn corrupt_container_reports_decode_error() {
    let dir = scratch_dir("corrupt_container_reports_decode_error");
    let path = dir.join("broken.4x4.i8y");
    let mut bytes = stored(&[0; 16]);
    bytes.truncate(bytes.len() - 3);
    std::fs::write(&path, bytes).unwrap();

    let err = load_texture(&path, Overshoot::Reject).err().unwrap();
    assert!(err.chain().any(|e| e.downcast_ref::<yay0::DecodeError>().is_some()), "{err:#}");
}
