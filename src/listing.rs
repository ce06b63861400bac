//! The listing run: resolve root, open output, traverse, write, close.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::ListConfig;
use crate::error::{ListError, Result};
use crate::output::{LineWriter, PathSink};
use crate::walker::FileWalker;

/// Statistics for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSummary {
    pub files_written: usize,
    /// Traversal errors that were skipped (unreadable directories and the like).
    pub skipped: usize,
    pub elapsed: Duration,
}

/// List every file under `config.root` into `config.output`.
///
/// The output is truncated before the traversal starts. If it lives inside
/// the root it is therefore listed too.
pub fn write_file_list(config: &ListConfig) -> Result<ListSummary> {
    let start = Instant::now();

    let root = config.resolve_root()?;
    debug!("listing files under {}", root.display());

    let mut sink =
        LineWriter::create(&config.output).map_err(|source| ListError::OutputUnwritable {
            path: config.output.clone(),
            source,
        })?;

    let walker = FileWalker::new(root).sorted(config.sorted);
    let skipped = write_entries(&walker, &mut sink).map_err(|source| ListError::Write {
        path: config.output.clone(),
        source,
    })?;

    let summary = ListSummary {
        files_written: sink.lines(),
        skipped,
        elapsed: start.elapsed(),
    };
    info!(
        "wrote {} {} to {} in {} ({} skipped)",
        summary.files_written,
        if summary.files_written == 1 { "path" } else { "paths" },
        config.output.display(),
        humantime::format_duration(round_to_millis(summary.elapsed)),
        summary.skipped
    );
    Ok(summary)
}

/// Feed every file from `walker` into `sink` and flush it.
///
/// Returns the number of skipped traversal errors.
pub fn write_entries<S: PathSink>(walker: &FileWalker, sink: &mut S) -> std::io::Result<usize> {
    let mut files = walker.files();
    for entry in &mut files {
        sink.write_path(&entry.relative)?;
    }
    sink.finish()?;
    Ok(files.skipped())
}

fn round_to_millis(d: Duration) -> Duration {
    Duration::from_millis(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[derive(Default)]
    struct Collect(Vec<PathBuf>, bool);

    impl PathSink for Collect {
        fn write_path(&mut self, relative: &Path) -> io::Result<()> {
            self.0.push(relative.to_path_buf());
            Ok(())
        }

        fn finish(&mut self) -> io::Result<()> {
            self.1 = true;
            Ok(())
        }
    }

    struct Failing;

    impl PathSink for Failing {
        fn write_path(&mut self, _: &Path) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }

        fn finish(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_round_to_millis() {
        assert_eq!(
            round_to_millis(Duration::from_micros(12_345)),
            Duration::from_millis(12)
        );
        assert_eq!(round_to_millis(Duration::MAX), Duration::from_millis(u64::MAX));
    }

    #[test]
    fn test_write_entries_feeds_sink_and_finishes() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.txt"), "").unwrap();

        let mut sink = Collect::default();
        let skipped = write_entries(&FileWalker::new(dir.path()), &mut sink).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(sink.0, vec![Path::new("sub").join("b.txt")]);
        assert!(sink.1, "finish should be called");
    }

    #[test]
    fn test_write_entries_stops_on_sink_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();

        let err = write_entries(&FileWalker::new(dir.path()), &mut Failing).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn test_scenario_three_files() {
        let root = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("sub/deep")).unwrap();
        fs::write(root.path().join("a.txt"), "a").unwrap();
        fs::write(root.path().join("sub/b.txt"), "b").unwrap();
        fs::write(root.path().join("sub/deep/c.txt"), "c").unwrap();

        let output = out_dir.path().join("file_paths.txt");
        let config = ListConfig::new(root.path())
            .with_output(&output)
            .with_sorted(true);
        let summary = write_file_list(&config).unwrap();

        assert_eq!(summary.files_written, 3);
        assert_eq!(summary.skipped, 0);
        let expected: Vec<String> = [
            PathBuf::from("a.txt"),
            Path::new("sub").join("b.txt"),
            Path::new("sub").join("deep").join("c.txt"),
        ]
        .iter()
        .map(|p| p.display().to_string())
        .collect();
        assert_eq!(lines(&output), expected);
        assert!(fs::read_to_string(&output).unwrap().ends_with('\n'));
    }

    #[test]
    fn test_empty_tree_gives_empty_file() {
        let root = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("x/y/z")).unwrap();
        fs::create_dir_all(root.path().join("w")).unwrap();

        let output = out_dir.path().join("out.txt");
        let summary = write_file_list(&ListConfig::new(root.path()).with_output(&output)).unwrap();

        assert_eq!(summary.files_written, 0);
        assert!(output.exists());
        assert_eq!(fs::read(&output).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_output_inside_root_lists_itself() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("a.txt"), "a").unwrap();
        let output = root.path().join("file_paths.txt");

        write_file_list(&ListConfig::new(root.path()).with_output(&output).with_sorted(true))
            .unwrap();

        assert_eq!(lines(&output), vec!["a.txt", "file_paths.txt"]);
    }

    #[test]
    fn test_rerun_is_byte_identical_when_sorted() {
        let root = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        for name in ["b.txt", "a/x.txt", "a/y.txt", "c/d/e.txt"] {
            let full = root.path().join(name);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, name).unwrap();
        }

        let output = out_dir.path().join("out.txt");
        let config = ListConfig::new(root.path()).with_output(&output).with_sorted(true);
        write_file_list(&config).unwrap();
        let first = fs::read(&output).unwrap();
        write_file_list(&config).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_root_does_not_create_output() {
        let root = TempDir::new().unwrap();
        let output = root.path().join("out.txt");
        let config = ListConfig::new(root.path().join("gone")).with_output(&output);

        let err = write_file_list(&config).unwrap_err();
        assert!(matches!(err, ListError::RootInaccessible { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_unwritable_output() {
        let root = TempDir::new().unwrap();
        let output = root.path().join("missing-dir").join("out.txt");

        let err = write_file_list(&ListConfig::new(root.path()).with_output(&output)).unwrap_err();
        assert!(matches!(err, ListError::OutputUnwritable { .. }));
        assert!(err.to_string().contains("out.txt"));
    }
}
