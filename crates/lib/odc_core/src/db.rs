//! Throwaway PostgreSQL servers for store tests.
//!
//! [`DbManager::ephemeral`] lays out a cluster in a temporary directory using
//! the binaries reported by `pg_config --bindir`; [`DbManager::start`] brings
//! it up on a free localhost port with an `odc` database in it.

use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;

const DATABASE: &str = "odc";

/// Seconds `pg_ctl` waits for startup or shutdown.
const PG_CTL_WAIT_SECS: &str = "30";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("pg_config not found on PATH")]
    PgConfigNotFound,

    #[error("{tool} failed: {stderr}")]
    Tool { tool: &'static str, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// A PostgreSQL cluster living in a temporary directory.
///
/// Dropping a running manager stops the server before the directory is removed.
pub struct DbManager {
    bin_dir: PathBuf,
    cluster: tempfile::TempDir,
    port: u16,
    running: bool,
}

impl DbManager {
    /// Locate the PostgreSQL binaries and reserve a cluster directory.
    pub async fn ephemeral() -> Result<Self> {
        let output = Command::new("pg_config")
            .arg("--bindir")
            .output()
            .await
            .map_err(|_| DbError::PgConfigNotFound)?;
        if !output.status.success() {
            return Err(DbError::PgConfigNotFound);
        }
        let bin_dir = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());

        Ok(Self {
            bin_dir,
            cluster: tempfile::tempdir()?,
            port: 0,
            running: false,
        })
    }

    /// Initialize the cluster, start the server and create the database.
    pub async fn start(&mut self) -> Result<()> {
        let data = self.data_dir();
        if !data.join("PG_VERSION").exists() {
            self.tool("initdb", &["--no-locale", "--encoding=UTF8", "-D"], Some(&data))
                .await?;
        }

        self.port = free_port()?;
        let server_opts = format!(
            "-p {} -h localhost -k {}",
            self.port,
            self.cluster.path().display()
        );
        let logfile = self.cluster.path().join("server.log");
        self.tool(
            "pg_ctl",
            &[
                "start",
                "-w",
                "-t",
                PG_CTL_WAIT_SECS,
                "-o",
                &server_opts,
                "-l",
                &logfile.to_string_lossy(),
                "-D",
            ],
            Some(&data),
        )
        .await?;
        self.running = true;
        log::info!("PostgreSQL listening on localhost:{}", self.port);

        let port = self.port.to_string();
        self.tool("createdb", &["-h", "localhost", "-p", &port, DATABASE], None)
            .await
    }

    /// Stop the server. Does nothing unless it is running.
    pub async fn stop(&mut self) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        let data = self.data_dir();
        self.tool("pg_ctl", &["stop", "-w", "-m", "fast", "-D"], Some(&data))
            .await?;
        self.running = false;
        Ok(())
    }

    pub fn connection_url(&self) -> String {
        format!("postgresql://localhost:{}/{DATABASE}", self.port)
    }

    fn data_dir(&self) -> PathBuf {
        self.cluster.path().join("data")
    }

    /// Run a binary from the PostgreSQL bin directory, with `path` appended last.
    async fn tool(&self, tool: &'static str, args: &[&str], path: Option<&Path>) -> Result<()> {
        let mut cmd = Command::new(self.bin_dir.join(tool));
        cmd.args(args).stdin(Stdio::null());
        if let Some(path) = path {
            cmd.arg(path);
        }
        let output = cmd.output().await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(DbError::Tool {
                tool,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl Drop for DbManager {
    fn drop(&mut self) {
        if self.running {
            let _ = std::process::Command::new(self.bin_dir.join("pg_ctl"))
                .args(["stop", "-m", "immediate", "-D"])
                .arg(self.data_dir())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
        }
    }
}

fn free_port() -> Result<u16> {
    Ok(TcpListener::bind("127.0.0.1:0")?.local_addr()?.port())
}
