//! Synthetic WAV buffers for the integration tests.

#![allow(dead_code)]

/// A RIFF sub-chunk, padded to an even length.
pub fn chunk(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
    if body.len() % 2 == 1 {
        out.push(0);
    }
    out
}

/// A `labl` entry for an adtl list.
pub fn label(cue_point_id: u32, text: &str) -> Vec<u8> {
    let mut body = cue_point_id.to_le_bytes().to_vec();
    body.extend_from_slice(text.as_bytes());
    body.push(0);
    chunk(b"labl", &body)
}

pub fn fixed(text: &str, len: usize) -> Vec<u8> {
    let mut out = text.as_bytes().to_vec();
    out.resize(len, 0);
    out
}

pub fn bext_body(description: &str, time_reference: u64, coding_history: &str) -> Vec<u8> {
    let mut body = fixed(description, 256);
    body.extend(fixed("Recorder", 32));
    body.extend(fixed("REF", 32));
    body.extend(fixed("2023-11-02", 10));
    body.extend(fixed("08:15:30", 8));
    body.extend_from_slice(&(time_reference as u32).to_le_bytes());
    body.extend_from_slice(&((time_reference >> 32) as u32).to_le_bytes());
    body.extend_from_slice(&1u16.to_le_bytes());
    body.extend(vec![0u8; 64]);
    body.extend(vec![0u8; 10]);
    body.extend(vec![0u8; 180]);
    body.extend_from_slice(coding_history.as_bytes());
    body
}

#[derive(Default)]
pub struct WavBuilder {
    body: Vec<u8>,
}

impl WavBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fmt(self, audio_format: u16, channels: u16, sample_rate: u32, bits: u16) -> Self {
        let block_align = channels * bits / 8;
        let mut body = Vec::new();
        body.extend_from_slice(&audio_format.to_le_bytes());
        body.extend_from_slice(&channels.to_le_bytes());
        body.extend_from_slice(&sample_rate.to_le_bytes());
        body.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
        body.extend_from_slice(&block_align.to_le_bytes());
        body.extend_from_slice(&bits.to_le_bytes());
        self.chunk(b"fmt ", &body)
    }

    pub fn chunk(mut self, id: &[u8; 4], body: &[u8]) -> Self {
        self.body.extend(chunk(id, body));
        self
    }

    pub fn list(self, list_type: &[u8; 4], entries: &[Vec<u8>]) -> Self {
        let mut body = list_type.to_vec();
        body.extend(entries.concat());
        self.chunk(b"LIST", &body)
    }

    /// A `data` header declaring `size` bytes, followed by `size` zero bytes.
    pub fn data(mut self, size: u32) -> Self {
        self.body.extend_from_slice(b"data");
        self.body.extend_from_slice(&size.to_le_bytes());
        self.body.extend(vec![0u8; size as usize]);
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(bytes);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = b"RIFF".to_vec();
        out.extend_from_slice(&(self.body.len() as u32 + 4).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(&self.body);
        out
    }
}
