use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::synth::wave::WaveBuffer;

const BITS_PER_SAMPLE: u16 = 16;

/// Writes `buffer` as an uncompressed little-endian PCM WAV file.
///
/// Layout is the standard RIFF/WAVE container: RIFF header, 16-byte fmt
/// chunk (format tag 1), then frame-major interleaved 16-bit samples.
pub fn write_wav<W: Write>(writer: &mut W, sample_rate: u32, buffer: &WaveBuffer) -> io::Result<()> {
    let channels = buffer.channels() as u16;
    let bytes_per_sample = (BITS_PER_SAMPLE / 8) as u32;
    let block_align = channels as u32 * bytes_per_sample;
    let byte_rate = sample_rate * block_align;
    let data_size = buffer.frames() as u32 * block_align;
    let file_size = 36 + data_size;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // chunk size
    writer.write_all(&1u16.to_le_bytes())?; // audio format (1 = PCM)
    writer.write_all(&channels.to_le_bytes())?;
    writer.write_all(&sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&(block_align as u16).to_le_bytes())?;
    writer.write_all(&BITS_PER_SAMPLE.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(&interleave_pcm16(buffer))?;

    Ok(())
}

/// Complete WAV file as bytes.
pub fn write_wav_to_vec(sample_rate: u32, buffer: &WaveBuffer) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(44 + buffer.frames() * buffer.channels() * 2);
    write_wav(&mut bytes, sample_rate, buffer).expect("writing to Vec should not fail");
    bytes
}

/// Converts the buffer to interleaved 16-bit PCM, frame-major. Samples
/// outside [-1, 1] are clipped.
fn interleave_pcm16(buffer: &WaveBuffer) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(buffer.frames() * buffer.channels() * 2);
    for frame in 0..buffer.frames() {
        for ch in 0..buffer.channels() {
            let clipped = buffer.channel(ch)[frame].clamp(-1.0, 1.0);
            let value = (clipped * 32767.0).round() as i16;
            pcm.extend_from_slice(&value.to_le_bytes());
        }
    }
    pcm
}

/// Saves `buffer` under `dir` as `<title>_<unix-millis>.wav` and returns
/// the written path.
pub fn save_wave(
    dir: &Path,
    title: &str,
    sample_rate: u32,
    buffer: &WaveBuffer,
) -> io::Result<PathBuf> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
        .as_millis();
    let path = dir.join(format!("{}_{}.wav", title, millis));

    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    write_wav(&mut writer, sample_rate, buffer)?;
    writer.flush()?;

    Ok(path)
}
