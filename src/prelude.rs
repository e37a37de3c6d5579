pub use crate::cursor::ByteCursor;
pub use crate::error::{ParseError, ParseResult};
pub use anyhow::{Context, Result as R, anyhow};
pub use tracing::{debug, trace, warn};

pub use memmap2::MmapOptions;
