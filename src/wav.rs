//! Canonical 44-byte RIFF/WAVE header plus mono 16-bit PCM data.
//!
//! ```plaintext
//! offset  size  field
//!      0     4  "RIFF"
//!      4     4  36 + data_size
//!      8     4  "WAVE"
//!     12     4  "fmt "
//!     16     4  16
//!     20     2  format (1 = PCM)
//!     22     2  channels (1)
//!     24     4  sample_rate
//!     28     4  byte_rate = sample_rate * 2
//!     32     2  block_align (2)
//!     34     2  bits_per_sample (16)
//!     36     4  "data"
//!     40     4  data_size = sample_count * 2
//!     44     -  samples, i16 little-endian
//! ```

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::error::{Result, WhooshError};

pub const HEADER_LEN: usize = 44;
pub const PCM_FORMAT: u16 = 1;
pub const CHANNELS: u16 = 1;
pub const BITS_PER_SAMPLE: u16 = 16;
pub const BYTES_PER_SAMPLE: u32 = (BITS_PER_SAMPLE / 8) as u32;

/// Largest sample count whose RIFF size still fits in a `u32`.
pub const MAX_SAMPLE_COUNT: u32 = (u32::MAX - 36) / BYTES_PER_SAMPLE;

/// Header fields for a mono 16-bit PCM file.
///
/// Only constructible through [`WavHeader::new`], so every size field fits in a `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    sample_rate: u32,
    sample_count: u32,
}

impl WavHeader {
    pub fn new(sample_rate: u32, sample_count: usize) -> Result<Self> {
        if sample_rate == 0 {
            return Err(WhooshError::invalid("sample rate must be positive"));
        }
        if sample_rate.checked_mul(BYTES_PER_SAMPLE).is_none() {
            return Err(WhooshError::invalid(format!(
                "sample rate {sample_rate} Hz overflows the byte rate field"
            )));
        }
        let sample_count = u32::try_from(sample_count)
            .ok()
            .filter(|n| *n <= MAX_SAMPLE_COUNT)
            .ok_or_else(|| {
                WhooshError::invalid(format!(
                    "{sample_count} samples do not fit in a WAV file"
                ))
            })?;
        Ok(Self {
            sample_rate,
            sample_count,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn data_size(&self) -> u32 {
        self.sample_count * BYTES_PER_SAMPLE
    }

    /// Value of the RIFF chunk size field: everything after the first 8 bytes.
    pub fn riff_size(&self) -> u32 {
        36 + self.data_size()
    }

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * BYTES_PER_SAMPLE * CHANNELS as u32
    }

    pub fn block_align(&self) -> u16 {
        CHANNELS * BITS_PER_SAMPLE / 8
    }

    /// Total size of the serialized file in bytes.
    pub fn file_size(&self) -> u64 {
        HEADER_LEN as u64 + self.data_size() as u64
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(b"RIFF");
        out[4..8].copy_from_slice(&self.riff_size().to_le_bytes());
        out[8..12].copy_from_slice(b"WAVE");

        out[12..16].copy_from_slice(b"fmt ");
        out[16..20].copy_from_slice(&16u32.to_le_bytes());
        out[20..22].copy_from_slice(&PCM_FORMAT.to_le_bytes());
        out[22..24].copy_from_slice(&CHANNELS.to_le_bytes());
        out[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&self.byte_rate().to_le_bytes());
        out[32..34].copy_from_slice(&self.block_align().to_le_bytes());
        out[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

        out[36..40].copy_from_slice(b"data");
        out[40..44].copy_from_slice(&self.data_size().to_le_bytes());
        out
    }
}

/// Scale a normalized sample to 16 bits, rounding to nearest.
pub fn quantize(sample: f32) -> i16 {
    (sample * i16::MAX as f32)
        .round()
        .clamp(-(i16::MAX as f32), i16::MAX as f32) as i16
}

/// Write `header` followed by `samples`.
///
/// Fails with [`io::ErrorKind::InvalidInput`] before writing anything if the number of samples
/// differs from the count declared in the header.
pub fn encode<W, I>(writer: &mut W, header: &WavHeader, samples: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = i16>,
    I::IntoIter: ExactSizeIterator,
{
    let samples = samples.into_iter();
    if samples.len() != header.sample_count as usize {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "header declares {} samples but {} were given",
                header.sample_count,
                samples.len()
            ),
        ));
    }
    writer.write_all(&header.to_bytes())?;
    for sample in samples {
        writer.write_all(&sample.to_le_bytes())?;
    }
    Ok(())
}

/// Encode `samples` into a WAV file at `path`, replacing any existing file.
///
/// Data goes to a hidden sibling file first and is renamed over `path` once complete, so a
/// failed write never leaves a truncated file at `path`.
pub fn write_file<P, I>(path: P, sample_rate: u32, samples: I) -> Result<WavHeader>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = i16>,
    I::IntoIter: ExactSizeIterator,
{
    let path = path.as_ref();
    let samples = samples.into_iter();
    let header = WavHeader::new(sample_rate, samples.len())?;
    let tmp = temp_path(path)?;

    let written = write_new(&tmp, &header, samples).and_then(|()| fs::rename(&tmp, path));
    if let Err(err) = written {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            if cleanup.kind() != io::ErrorKind::NotFound {
                log::warn!("could not remove {}: {}", tmp.display(), cleanup);
            }
        }
        return Err(WhooshError::io(path, err));
    }

    log::debug!(
        "wrote {} ({} samples, {} bytes)",
        path.display(),
        header.sample_count,
        header.file_size()
    );
    Ok(header)
}

fn write_new<I>(path: &Path, header: &WavHeader, samples: I) -> io::Result<()>
where
    I: IntoIterator<Item = i16>,
    I::IntoIter: ExactSizeIterator,
{
    let mut writer = BufWriter::new(File::create(path)?);
    encode(&mut writer, header, samples)?;
    writer.into_inner().map_err(|e| e.into_error())?.sync_all()
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        WhooshError::invalid(format!("output path {} has no file name", path.display()))
    })?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(name);
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        let header = WavHeader::new(44_100, 13_230).unwrap();
        let bytes = header.to_bytes();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 36 + 26_460);
        assert_eq!(&bytes[8..16], b"WAVEfmt ");
        assert_eq!(u32::from_le_bytes(bytes[16..20].try_into().unwrap()), 16);
        assert_eq!(u16::from_le_bytes([bytes[20], bytes[21]]), 1);
        assert_eq!(u16::from_le_bytes([bytes[22], bytes[23]]), 1);
        assert_eq!(u32::from_le_bytes(bytes[24..28].try_into().unwrap()), 44_100);
        assert_eq!(u32::from_le_bytes(bytes[28..32].try_into().unwrap()), 88_200);
        assert_eq!(u16::from_le_bytes([bytes[32], bytes[33]]), 2);
        assert_eq!(u16::from_le_bytes([bytes[34], bytes[35]]), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32::from_le_bytes(bytes[40..44].try_into().unwrap()), 26_460);
    }

    #[test]
    fn sizes_are_consistent() {
        let header = WavHeader::new(44_100, 13_230).unwrap();
        assert_eq!(header.data_size(), 26_460);
        assert_eq!(header.riff_size(), 26_496);
        assert_eq!(header.file_size(), 26_504);
    }

    #[test]
    fn rejects_unrepresentable_headers() {
        assert!(matches!(
            WavHeader::new(0, 10),
            Err(WhooshError::InvalidParameter(_))
        ));
        assert!(WavHeader::new(u32::MAX, 10).is_err());
        assert!(WavHeader::new(44_100, MAX_SAMPLE_COUNT as usize + 1).is_err());
        assert!(WavHeader::new(44_100, MAX_SAMPLE_COUNT as usize).is_ok());
    }

    #[test]
    fn quantize_rounds_and_clamps() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 32_767);
        assert_eq!(quantize(-1.0), -32_767);
        assert_eq!(quantize(0.8), 26_214);
        assert_eq!(quantize(3.0), 32_767);
        assert_eq!(quantize(-3.0), -32_767);
    }

    #[test]
    fn encode_appends_little_endian_samples() {
        let header = WavHeader::new(8_000, 3).unwrap();
        let mut out = Vec::new();
        encode(&mut out, &header, [1, -2, 0x1234]).unwrap();

        assert_eq!(out.len() as u64, header.file_size());
        assert_eq!(&out[HEADER_LEN..], &[0x01, 0x00, 0xfe, 0xff, 0x34, 0x12]);
    }

    #[test]
    fn encode_rejects_mismatched_sample_count() {
        let header = WavHeader::new(44_100, 10).unwrap();
        let mut out = Vec::new();
        let err = encode(&mut out, &header, [1, 2, 3]).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());
    }

    #[test]
    fn header_getters_report_checked_values() {
        let header = WavHeader::new(48_000, 7).unwrap();
        assert_eq!(header.sample_rate(), 48_000);
        assert_eq!(header.sample_count(), 7);
        assert_eq!(header.byte_rate(), 96_000);
        assert_eq!(header.block_align(), 2);
    }

    #[test]
    fn temp_file_is_a_hidden_sibling() {
        let tmp = temp_path(Path::new("out/SwordWhoosh.wav")).unwrap();
        assert_eq!(tmp, Path::new("out/.SwordWhoosh.wav.tmp"));
        assert!(temp_path(Path::new("/")).is_err());
    }
}
