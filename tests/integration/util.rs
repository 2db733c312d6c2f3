use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const HEADER: &str =
    "timestamp,path,total_bytes,used_bytes,free_bytes,free_percent,total_human,used_human,free_human";

const DULOG_EXE_PATH: &str = env!("CARGO_BIN_EXE_dulog");

/// Returns a [`Command`] for the dulog binary with the home and config
/// directories redirected into `home`, so nothing touches the real ones.
pub fn dulog_command(home: &Path) -> Command {
    let mut cmd = Command::new(DULOG_EXE_PATH);
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local").join("share"))
        .env_remove("RUST_LOG");
    cmd
}

/// Pulls the file path out of "Wrote disk usage to: <path>".
pub fn written_path(stdout: &[u8]) -> PathBuf {
    let text = String::from_utf8_lossy(stdout);
    let line = text
        .lines()
        .find_map(|l| l.strip_prefix("Wrote disk usage to: "))
        .expect("missing result line");
    PathBuf::from(line)
}

/// All daily CSV files in `dir`, sorted by name.
pub fn daily_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            let name = p.file_name().unwrap().to_string_lossy();
            name.starts_with("disk_usage_") && name.ends_with(".csv")
        })
        .collect();
    files.sort();
    files
}

pub fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path).unwrap().lines().map(str::to_string).collect()
}
