use crate::collectors::capacity::{CapacityProbe, StatvfsProbe};
use crate::error::{RecordError, Result};
use crate::models::sample::UsageSample;
use chrono::{DateTime, Local, NaiveDate};
use fs2::FileExt;
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Subdirectory of the home directory used when no output dir is given.
pub const DEFAULT_REPORT_DIR: &str = "disk_reports";

/// Daily file name: `disk_usage_YYYYMMDD.csv`
pub fn daily_file_name(date: NaiveDate) -> String {
    format!("disk_usage_{}.csv", date.format("%Y%m%d"))
}

/// Caller-supplied overrides. Anything left `None` falls back to the home
/// directory (queried path) or `<home>/disk_reports` (output dir).
#[derive(Debug, Clone, Default)]
pub struct RecordOptions {
    pub queried_path: Option<PathBuf>,
    pub output_dir:   Option<PathBuf>,
    pub lock:         bool,
}

/// Paths after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub queried_path: PathBuf,
    pub output_dir:   PathBuf,
}

impl RecordOptions {
    pub fn resolve(&self) -> Result<ResolvedPaths> {
        self.resolve_with_home(dirs::home_dir())
    }

    /// The home directory is only required when a default is needed.
    pub fn resolve_with_home(&self, home: Option<PathBuf>) -> Result<ResolvedPaths> {
        let require_home = || home.clone().ok_or(RecordError::NoHomeDir);
        let queried_path = match &self.queried_path {
            Some(p) => p.clone(),
            None    => require_home()?,
        };
        let output_dir = match &self.output_dir {
            Some(p) => p.clone(),
            None    => require_home()?.join(DEFAULT_REPORT_DIR),
        };
        Ok(ResolvedPaths { queried_path, output_dir })
    }
}

/// Outcome of one successful append.
#[derive(Debug, Clone)]
pub struct Recording {
    pub path:           PathBuf,
    pub sample:         UsageSample,
    pub header_written: bool,
}

pub struct Recorder<P = StatvfsProbe> {
    paths: ResolvedPaths,
    lock:  bool,
    probe: P,
}

impl Recorder<StatvfsProbe> {
    pub fn new(paths: ResolvedPaths) -> Self {
        Self::with_probe(paths, StatvfsProbe)
    }

    pub fn from_options(opts: &RecordOptions) -> Result<Self> {
        Ok(Self::new(opts.resolve()?).lock(opts.lock))
    }
}

impl<P: CapacityProbe> Recorder<P> {
    pub fn with_probe(paths: ResolvedPaths, probe: P) -> Self {
        Self { paths, lock: false, probe }
    }

    /// Hold an exclusive advisory lock on the daily file while appending.
    pub fn lock(mut self, on: bool) -> Self {
        self.lock = on;
        self
    }

    pub fn record(&self) -> Result<Recording> {
        self.record_at(Local::now())
    }

    /// Record using `now` for both the file date and the row timestamp.
    pub fn record_at(&self, now: DateTime<Local>) -> Result<Recording> {
        let output_dir = absolutize(&self.paths.output_dir)?;
        let target = output_dir.join(daily_file_name(now.date_naive()));

        fs::create_dir_all(&output_dir)
            .map_err(|source| RecordError::CreateDir { path: output_dir.clone(), source })?;

        let queried = &self.paths.queried_path;
        let cap = self.probe.capacity(queried)
            .map_err(|source| RecordError::Stat { path: queried.clone(), source })?;
        debug!("{}: total={} used={} free={}",
            queried.display(), cap.total_bytes, cap.used_bytes, cap.free_bytes);

        let sample = UsageSample::new(&now, &queried.to_string_lossy(), cap);
        let header_written = if self.lock {
            append_locked(&target, &sample)?
        } else {
            append(&target, &sample)?
        };

        if header_written {
            info!("created {}", target.display());
        }
        info!("appended {} ({}% free) to {}",
            sample.path, sample.free_percent_str(), target.display());

        Ok(Recording { path: target, sample, header_written })
    }
}

fn absolutize(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(RecordError::CurrentDir)?;
    Ok(cwd.join(dir))
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| RecordError::Open { path: path.to_path_buf(), source })
}

/// Header iff the file did not exist before this call. Returns whether it was written.
fn append(path: &Path, sample: &UsageSample) -> Result<bool> {
    let write_header = !path.exists();
    let file = open_append(path)?;
    write_row(path, &file, sample, write_header)?;
    Ok(write_header)
}

/// Existence cannot be observed under the lock, so an empty file gets the header.
fn append_locked(path: &Path, sample: &UsageSample) -> Result<bool> {
    let file = open_append(path)?;
    FileExt::lock_exclusive(&file)
        .map_err(|source| RecordError::Lock { path: path.to_path_buf(), source })?;

    let result = file.metadata()
        .map_err(|source| RecordError::Open { path: path.to_path_buf(), source })
        .and_then(|meta| {
            let write_header = meta.len() == 0;
            write_row(path, &file, sample, write_header).map(|()| write_header)
        });

    // Closing the file drops the lock anyway.
    let _ = FileExt::unlock(&file);
    result
}

fn write_row(path: &Path, file: &File, sample: &UsageSample, header: bool) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(header)
        .from_writer(file);
    wtr.serialize(sample)
        .and_then(|()| wtr.flush().map_err(csv::Error::from))
        .map_err(|source| RecordError::Write { path: path.to_path_buf(), source })
}
