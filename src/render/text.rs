use crate::error::{Error, Result};
use crate::log::LogCounts;
use crate::model::TagCounts;

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::info;

/// Render the two-section report.
///
/// ```text
/// Tag Counts:
/// Tag,Count
/// sv_P1,2
///
/// Port/Protocol Combination Counts:
/// Port,Protocol,Count
/// 23,tcp,1
/// ```
pub fn render_report(tags: &TagCounts, logs: &LogCounts) -> String {
    let mut out = String::new();

    out.push_str("Tag Counts:\n");
    out.push_str("Tag,Count\n");
    for (tag, n) in tags.iter() {
        out.push_str(&format!("{tag},{n}\n"));
    }

    out.push_str("\nPort/Protocol Combination Counts:\n");
    out.push_str("Port,Protocol,Count\n");
    for (key, n) in logs.iter() {
        out.push_str(&format!("{},{},{n}\n", key.port(), key.protocol()));
    }

    out
}

/// Write the report to a new file at `path`.
///
/// Fails with [`Error::OutputExists`] instead of replacing an existing file.
pub fn write_report(path: &Path, tags: &TagCounts, logs: &LogCounts) -> Result<()> {
    let body = render_report(tags, logs);

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(Error::OutputExists {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(Error::io(path, e)),
    };
    file.write_all(body.as_bytes())
        .map_err(|e| Error::io(path, e))?;
    file.flush().map_err(|e| Error::io(path, e))?;

    info!(path = %path.display(), bytes = body.len(), "wrote report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupKey;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn sample() -> (TagCounts, LogCounts) {
        let mut logs = LogCounts::new();
        logs.add(LookupKey::new("23", "tcp"), 1);
        logs.add(LookupKey::new("443", "tcp"), 3);
        logs.add(LookupKey::new("110", "tcp"), 1);

        let mut tags = TagCounts::new();
        tags.add("sv_P1".to_string(), 1);
        tags.add("sv_P2".to_string(), 3);
        tags.add("Untagged".to_string(), 1);
        (tags, logs)
    }

    #[test]
    fn report_layout() {
        let (tags, logs) = sample();
        let expected = "\
Tag Counts:
Tag,Count
sv_P1,1
sv_P2,3
Untagged,1

Port/Protocol Combination Counts:
Port,Protocol,Count
23,tcp,1
443,tcp,3
110,tcp,1
";
        assert_eq!(render_report(&tags, &logs), expected);
    }

    #[test]
    fn empty_sections_keep_headers() {
        let expected = "\
Tag Counts:
Tag,Count

Port/Protocol Combination Counts:
Port,Protocol,Count
";
        assert_eq!(render_report(&TagCounts::new(), &LogCounts::new()), expected);
    }

    #[test]
    fn writes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.txt");
        let (tags, logs) = sample();

        write_report(&path, &tags, &logs).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), render_report(&tags, &logs));
    }

    #[test]
    fn existing_file_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.txt");
        fs::write(&path, "keep me\n").unwrap();
        let (tags, logs) = sample();

        let err = write_report(&path, &tags, &logs).unwrap_err();
        assert!(matches!(err, Error::OutputExists { .. }), "{err:?}");
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me\n");
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/counts.txt");
        let (tags, logs) = sample();

        let err = write_report(&path, &tags, &logs).unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "{err:?}");
    }
}
