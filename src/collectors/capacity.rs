use crate::models::sample::Capacity;
use std::io;
use std::path::Path;

/// Source of capacity figures for the filesystem containing a path.
pub trait CapacityProbe {
    fn capacity(&self, path: &Path) -> io::Result<Capacity>;
}

/// Asks the OS: `statvfs(3)` on unix, the platform space queries elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatvfsProbe;

impl CapacityProbe for StatvfsProbe {
    #[cfg(unix)]
    fn capacity(&self, path: &Path) -> io::Result<Capacity> {
        use nix::sys::statvfs::statvfs;
        let stat = statvfs(path).map_err(io::Error::from)?;

        let frsize = stat.fragment_size() as u64;
        let total_bytes = stat.blocks() as u64 * frsize;
        let free_raw    = stat.blocks_free() as u64 * frsize;
        let free_bytes  = stat.blocks_available() as u64 * frsize;
        let used_bytes  = total_bytes.saturating_sub(free_raw);

        Ok(Capacity { total_bytes, used_bytes, free_bytes })
    }

    #[cfg(not(unix))]
    fn capacity(&self, path: &Path) -> io::Result<Capacity> {
        let total_bytes = fs2::total_space(path)?;
        let free_bytes  = fs2::available_space(path)?;
        let used_bytes  = total_bytes.saturating_sub(fs2::free_space(path)?);
        Ok(Capacity { total_bytes, used_bytes, free_bytes })
    }
}

/// Fixed figures, for callers that already have numbers (and for tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub Capacity);

impl CapacityProbe for FixedProbe {
    fn capacity(&self, _path: &Path) -> io::Result<Capacity> {
        Ok(self.0)
    }
}
