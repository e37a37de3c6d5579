pub mod chunks;
pub mod cursor;
pub mod error;
pub mod metrics;
pub mod prelude;
pub mod report;
pub mod riff;

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::prelude::*;
pub use error::{ParseError, ParseResult};
pub use report::WavReport;
pub use riff::{ParseOptions, WavHeader, parse_wav, parse_wav_with};

// Files above this size are memory mapped instead of read into a buffer.
const MMAP_THRESHOLD: u64 = 100 * 1024 * 1024;

pub fn probe_file(path: &str) -> R<WavReport> {
    WavProbe::new(path)?.parse()?.report()
}

/// A WAV file on disk together with what has been learned from it.
#[derive(Debug, Default)]
pub struct WavProbe {
    pub path: PathBuf,
    pub options: ParseOptions,
    pub file_size: u64,
    pub header: Option<WavHeader>,
}

impl WavProbe {
    pub fn new(input_file: &str) -> R<Self> {
        let path = PathBuf::from(input_file);
        if !path.exists() {
            return Err(anyhow!("Input file does not exist: {}", path.display()));
        }

        Ok(Self {
            path,
            ..Default::default()
        })
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn parse(mut self) -> R<Self> {
        let mut file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        self.file_size = file.metadata()?.len();

        let parsed = if self.file_size > MMAP_THRESHOLD {
            let mapped = unsafe { MmapOptions::new().map(&file)? };
            parse_wav_with(&mapped, &self.options)
        } else {
            let mut data = Vec::with_capacity(self.file_size as usize);
            file.read_to_end(&mut data)?;
            parse_wav_with(&data, &self.options)
        };

        let header =
            parsed.with_context(|| format!("Error reading WAV file: {}", self.path.display()))?;
        debug!(
            path = %self.path.display(),
            chunks_skipped = header.skipped_chunks.len(),
            "parsed"
        );
        self.header = Some(header);
        Ok(self)
    }

    pub fn get_filename(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unknown")
    }

    pub fn report(&self) -> R<WavReport> {
        let header = self
            .header
            .as_ref()
            .ok_or_else(|| anyhow!("No parsed header for {}", self.path.display()))?;
        WavReport::build(self.get_filename(), self.file_size, header)
            .with_context(|| format!("Error computing metrics for {}", self.path.display()))
    }
}
