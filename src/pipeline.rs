//! The report run: check output, load lookup table, parse log, aggregate, write.
//!
//! Each stage returns early on failure; later stages never run.

use crate::error::Error;
use crate::log::parse_log_file;
use crate::lookup::load_lookup_table;
use crate::model::count_tags;
use crate::render::write_report;

use std::path::PathBuf;
use tracing::{debug, warn};

/// Input and output locations for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_path: PathBuf,
    pub lookup_path: PathBuf,
    pub output_path: PathBuf,
}

/// How a run ended when no stage failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written(PathBuf),
    /// The output path was already taken; nothing was read or written.
    OutputExists(PathBuf),
}

/// The stage that stopped the run.
///
/// `cause` is `None` when the stage succeeded but produced no data, which
/// aborts the run just like a failure does.
#[derive(thiserror::Error, Debug)]
pub enum Failure {
    #[error("The lookup file {} is empty or an exception has occured.", .path.display())]
    Lookup {
        path: PathBuf,
        #[source]
        cause: Option<Error>,
    },

    #[error("The log file {} is empty or an exception has occured.", .path.display())]
    Log {
        path: PathBuf,
        #[source]
        cause: Option<Error>,
    },

    #[error("An error, {0}, occured while trying to write result output.")]
    Write(#[source] Error),
}

impl Failure {
    /// Console lines describing the failure, most specific first.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Failure::Lookup { cause, .. } => with_cause(cause, "process the lookup table", self),
            Failure::Log { cause, .. } => with_cause(cause, "process the log", self),
            Failure::Write(_) => vec![self.to_string()],
        }
    }
}

fn with_cause(cause: &Option<Error>, action: &str, failure: &Failure) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(e) = cause {
        lines.push(format!("An error, {e}, occured while trying to {action}."));
    }
    lines.push(failure.to_string());
    lines
}

/// Run every stage in order.
pub fn run(config: &Config) -> Result<Outcome, Failure> {
    if config.output_path.exists() {
        warn!(path = %config.output_path.display(), "output file already exists");
        return Ok(Outcome::OutputExists(config.output_path.clone()));
    }

    let lookup = match load_lookup_table(&config.lookup_path) {
        Ok(table) if !table.is_empty() => table,
        Ok(_) => {
            return Err(Failure::Lookup {
                path: config.lookup_path.clone(),
                cause: None,
            });
        }
        Err(e) => {
            return Err(Failure::Lookup {
                path: config.lookup_path.clone(),
                cause: Some(e),
            });
        }
    };

    let logs = match parse_log_file(&config.log_path) {
        Ok(counts) if !counts.is_empty() => counts,
        Ok(_) => {
            return Err(Failure::Log {
                path: config.log_path.clone(),
                cause: None,
            });
        }
        Err(e) => {
            return Err(Failure::Log {
                path: config.log_path.clone(),
                cause: Some(e),
            });
        }
    };

    let tags = count_tags(&lookup, &logs);
    debug!(tags = tags.len(), combinations = logs.len(), total = logs.total(), "aggregated");

    match write_report(&config.output_path, &tags, &logs) {
        Ok(()) => Ok(Outcome::Written(config.output_path.clone())),
        // Created by someone else after the check above.
        Err(Error::OutputExists { path }) => Ok(Outcome::OutputExists(path)),
        Err(e) => Err(Failure::Write(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const LOOKUP: &str = "dstport,protocol,tag\n23,tcp,sv_P1\n25,tcp,sv_P2\n";
    const LOG: &str = "2 123 eni 10.0.0.1 10.0.0.2 1 23 6 ...\n";

    fn setup(lookup: &str, log: &str) -> (TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let lookup_path = dir.path().join("lookup.csv");
        let log_path = dir.path().join("flow.log");
        fs::write(&lookup_path, lookup).unwrap();
        fs::write(&log_path, log).unwrap();
        let config = Config {
            log_path,
            lookup_path,
            output_path: dir.path().join("counts.txt"),
        };
        (dir, config)
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn end_to_end() {
        let (_dir, config) = setup(LOOKUP, LOG);

        let outcome = run(&config).unwrap();
        assert_eq!(outcome, Outcome::Written(config.output_path.clone()));
        assert_eq!(
            read(&config.output_path),
            "\
Tag Counts:
Tag,Count
sv_P1,1

Port/Protocol Combination Counts:
Port,Protocol,Count
23,tcp,1
"
        );
    }

    #[test]
    fn second_run_leaves_output_alone() {
        let (_dir, config) = setup(LOOKUP, LOG);
        run(&config).unwrap();
        let first = read(&config.output_path);

        fs::write(&config.log_path, "2 1 eni a b 1 25 6\n").unwrap();
        let outcome = run(&config).unwrap();
        assert_eq!(outcome, Outcome::OutputExists(config.output_path.clone()));
        assert_eq!(read(&config.output_path), first);
    }

    #[test]
    fn duplicate_lookup_aborts_before_log() {
        let (_dir, config) = setup("dstport,protocol,tag\n23,tcp,a\n23,tcp,b\n", "not a flow log\n");

        let failure = run(&config).unwrap_err();
        assert!(
            matches!(
                failure,
                Failure::Lookup {
                    cause: Some(Error::DuplicateKey { .. }),
                    ..
                }
            ),
            "{failure:?}"
        );
        assert!(!config.output_path.exists());

        let messages = failure.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("An error, The pair ('23', 'tcp') appears more than once in "));
        assert!(messages[0].ends_with(", occured while trying to process the lookup table."));
        assert!(messages[1].ends_with("is empty or an exception has occured."));
    }

    #[test]
    fn empty_lookup_is_a_failure() {
        let (_dir, config) = setup("dstport,protocol,tag\n", LOG);

        let failure = run(&config).unwrap_err();
        assert!(matches!(failure, Failure::Lookup { cause: None, .. }), "{failure:?}");
        assert_eq!(failure.messages().len(), 1);
    }

    #[test]
    fn empty_log_is_a_failure() {
        let (_dir, config) = setup(LOOKUP, "\n\n");

        let failure = run(&config).unwrap_err();
        assert!(matches!(failure, Failure::Log { cause: None, .. }), "{failure:?}");
        assert!(!config.output_path.exists());
    }

    #[test]
    fn version_mismatch_writes_nothing() {
        let (_dir, config) = setup(LOOKUP, &format!("{LOG}5 123 eni a b 1 23 6\n"));

        let failure = run(&config).unwrap_err();
        assert!(
            matches!(
                failure,
                Failure::Log {
                    cause: Some(Error::VersionMismatch { line: 2, .. }),
                    ..
                }
            ),
            "{failure:?}"
        );
        assert!(!config.output_path.exists());
        assert!(failure.messages()[0].ends_with(", occured while trying to process the log."));
    }

    #[test]
    fn missing_log_file() {
        let (dir, mut config) = setup(LOOKUP, LOG);
        config.log_path = dir.path().join("missing.log");

        let failure = run(&config).unwrap_err();
        assert!(
            matches!(failure, Failure::Log { cause: Some(Error::Io { .. }), .. }),
            "{failure:?}"
        );
    }

    #[test]
    fn unwritable_output() {
        let (dir, mut config) = setup(LOOKUP, LOG);
        config.output_path = dir.path().join("missing-dir").join("counts.txt");

        let failure = run(&config).unwrap_err();
        assert!(matches!(failure, Failure::Write(Error::Io { .. })), "{failure:?}");
        let messages = failure.messages();
        assert!(messages[0].ends_with(", occured while trying to write result output."));
    }
}
