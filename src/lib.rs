//! Append a snapshot of filesystem capacity to a dated CSV file.
//!
//! Each call writes one row to `<output_dir>/disk_usage_<YYYYMMDD>.csv`,
//! creating the directory, the file and its header as needed. Scheduling is
//! left to cron or a systemd timer.
//!
//! ```no_run
//! let path = dulog::record(None, None)?;
//! println!("Wrote disk usage to: {}", path.display());
//! # Ok::<(), dulog::RecordError>(())
//! ```

pub mod collectors;
pub mod config;
pub mod error;
pub mod models;
pub mod recorder;
pub mod util;

pub use error::RecordError;
pub use recorder::{RecordOptions, Recorder, Recording, ResolvedPaths};

use std::path::{Path, PathBuf};

/// Record one row for `queried_path` (default: home directory) into
/// `output_dir` (default: `~/disk_reports`) and return the file written.
pub fn record(queried_path: Option<&Path>, output_dir: Option<&Path>) -> error::Result<PathBuf> {
    let opts = RecordOptions {
        queried_path: queried_path.map(Path::to_path_buf),
        output_dir:   output_dir.map(Path::to_path_buf),
        lock:         false,
    };
    Ok(Recorder::from_options(&opts)?.record()?.path)
}
