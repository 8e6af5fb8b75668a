//! Local orchestrator driver: talks to `docker compose`.

use anyhow::{Context, anyhow, ensure};
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct ComposeDriver {
    pub service_name: String,
}

impl ComposeDriver {
    pub fn new(service_name: String) -> Self {
        Self { service_name }
    }

    /// Counts running containers whose name contains the worker service
    /// name.
    pub async fn list_workers(&self) -> anyhow::Result<u32> {
        let mut cmd = Command::new("docker");
        cmd.args(["compose", "ps", "--format", "{{.Name}}"]);
        let label = format!("{cmd:?}");
        let output = cmd.output().await.context("spawning docker compose ps")?;
        ensure!(output.status.success(), "{label}: {:?}", output.status);

        let stdout = String::from_utf8_lossy(&output.stdout);
        let count = stdout
            .lines()
            .filter(|line| line.contains(&self.service_name))
            .count();
        Ok(count as u32)
    }

    pub async fn scale_to(&self, count: u32) -> anyhow::Result<()> {
        let mut cmd = Command::new("docker");
        cmd.args([
            "compose",
            "up",
            "-d",
            "--scale",
            &format!("{}={count}", self.service_name),
        ]);
        let label = format!("{cmd:?}");
        let status = cmd.status().await.context("spawning docker compose up")?;
        if !status.success() {
            return Err(anyhow!("{label}: {status:?}"));
        }
        Ok(())
    }
}
