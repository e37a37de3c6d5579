use serde::Serialize;

use crate::prelude::*;

// Format tags
const FORMAT_PCM: u16 = 1;
const FORMAT_IEEE_FLOAT: u16 = 3;
const FORMAT_ALAW: u16 = 6;
const FORMAT_MULAW: u16 = 7;
const FORMAT_EXTENSIBLE: u16 = 65534; // 0xFFFE

/// The six fixed fields of a `fmt ` chunk. Anything after them
/// (cbSize, WAVE_FORMAT_EXTENSIBLE extension) is left undecoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FmtChunk {
    pub audio_format: u16,
    pub num_channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl FmtChunk {
    pub const SIZE: usize = 16;

    pub fn read(cursor: &mut ByteCursor) -> ParseResult<Self> {
        Ok(Self {
            audio_format: cursor.read_u16_le()?,
            num_channels: cursor.read_u16_le()?,
            sample_rate: cursor.read_u32_le()?,
            byte_rate: cursor.read_u32_le()?,
            block_align: cursor.read_u16_le()?,
            bits_per_sample: cursor.read_u16_le()?,
        })
    }

    /// Short codec tag in the style media probes print, e.g. `pcm_s16le`.
    pub fn codec_name(&self) -> String {
        match (self.audio_format, self.bits_per_sample) {
            (FORMAT_PCM, 8) => "pcm_u8".to_string(),
            (FORMAT_PCM, 16) => "pcm_s16le".to_string(),
            (FORMAT_PCM, 24) => "pcm_s24le".to_string(),
            (FORMAT_PCM, 32) => "pcm_s32le".to_string(),
            (FORMAT_IEEE_FLOAT, 32) => "pcm_f32le".to_string(),
            (FORMAT_IEEE_FLOAT, 64) => "pcm_f64le".to_string(),
            (FORMAT_ALAW, _) => "pcm_alaw".to_string(),
            (FORMAT_MULAW, _) => "pcm_mulaw".to_string(),
            (FORMAT_EXTENSIBLE, _) => "extensible".to_string(),
            (tag, _) => format!("unknown (0x{:04X})", tag),
        }
    }
}
