//! Common test utilities and helpers

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory for running the binary
pub struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the context root
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Command for the binary with no user or environment configuration leaking in
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("interval-stats").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("INTERVAL_STATS_DELIMITER")
            .env_remove("INTERVAL_STATS_FORMAT")
            .env_remove("INTERVAL_STATS_BINS")
            .env_remove("INTERVAL_STATS_SCHEMA")
            .env_remove("INTERVAL_STATS_LOG");
        cmd
    }
}

pub const VISITOR_LOG: &str = "timestamp,visitorid,event,itemid,transactionid\n\
1970-01-01 00:00:00,1,view,100,\n\
1970-01-01 00:00:10,1,view,101,\n\
1970-01-01 00:00:30,1,transaction,101,7\n";

pub const SESSION_LOG_HEADERLESS: &str = "s1,2024-03-01T10:00:00,10,books\n\
s1,2024-03-01T10:00:05,11,books\n\
s1,2024-03-01T10:00:20,12,music\n\
s2,2024-03-01T11:00:00,10,books\n\
s2,2024-03-01T11:00:04,13,music\n";

/// Click export without a header row and with integer session IDs
pub const SESSION_CLICKS_NUMERIC: &str = "1,2014-04-07T10:51:09.277Z,214536502,0\n\
1,2014-04-07T10:54:09.868Z,214536500,0\n\
1,2014-04-07T10:54:46.998Z,214536506,0\n\
2,2014-04-07T13:56:37.614Z,214662742,0\n\
2,2014-04-07T13:57:19.373Z,214662742,0\n";
