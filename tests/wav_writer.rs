//! Writer for WAV files

#![allow(dead_code)]

use std::path::Path;

use hound::*;

/// Writes mono sample data as a two-channel WAV file in 32-bit float format.
pub fn write(
    filename: impl AsRef<std::path::Path> + core::fmt::Display,
    sample_rate: u32,
    samples: &[f32],
) -> std::io::Result<()> {
    write_stereo(filename, sample_rate, samples, samples)
}

/// Writes two channels of sample data as WAV file in 32-bit float format.
pub fn write_stereo(
    filename: impl AsRef<std::path::Path> + core::fmt::Display,
    sample_rate: u32,
    left: &[f32],
    right: &[f32],
) -> std::io::Result<()> {
    let path = format!("out/{filename}");
    let path = Path::new(path.as_str());

    // Create parent directories to the path if they don't exist.
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec).map_err(to_io)?;

    for (l, r) in left.iter().zip(right.iter()) {
        writer.write_sample(*l).map_err(to_io)?;
        writer.write_sample(*r).map_err(to_io)?;
    }

    writer.finalize().map_err(to_io)
}

fn to_io(err: hound::Error) -> std::io::Error {
    match err {
        hound::Error::IoError(err) => err,
        other => std::io::Error::new(std::io::ErrorKind::Other, other.to_string()),
    }
}
