//! Cloud orchestrator driver: talks to a machines-style API over HTTP,
//! filtering by a `role=worker` metadata tag.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct CloudMachinesDriver {
    client: reqwest::Client,
    api_base: String,
    app_name: String,
    api_token: String,
}

#[derive(Debug, Deserialize)]
struct Machine {
    id: String,
    created_at: String,
    #[serde(default)]
    metadata: std::collections::HashMap<String, String>,
}

#[derive(Debug, Serialize)]
struct CreateMachineRequest {
    config: CreateMachineConfig,
}

#[derive(Debug, Serialize)]
struct CreateMachineConfig {
    metadata: std::collections::HashMap<String, String>,
}

impl CloudMachinesDriver {
    pub fn new(app_name: String, api_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: "https://api.machines.cloud".to_string(),
            app_name,
            api_token,
        }
    }

    async fn list_machines(&self) -> Result<Vec<Machine>> {
        let url = format!("{}/v1/apps/{}/machines", self.api_base, self.app_name);
        let machines: Vec<Machine> = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .context("listing machines")?
            .error_for_status()
            .context("machines API returned an error status")?
            .json()
            .await
            .context("decoding machines list response")?;

        Ok(machines
            .into_iter()
            .filter(|m| m.metadata.get("role").map(String::as_str) == Some("worker"))
            .collect())
    }

    pub async fn list_workers(&self) -> Result<u32> {
        Ok(self.list_machines().await?.len() as u32)
    }

    pub async fn scale_to(&self, count: u32) -> Result<()> {
        let mut machines = self.list_machines().await?;
        let current = machines.len() as u32;

        if current < count {
            for _ in current..count {
                self.create_machine().await?;
            }
        } else if current > count {
            machines.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            for machine in machines.into_iter().take((current - count) as usize) {
                self.destroy_machine(&machine.id).await?;
            }
        }

        Ok(())
    }

    async fn create_machine(&self) -> Result<()> {
        let url = format!("{}/v1/apps/{}/machines", self.api_base, self.app_name);
        let mut metadata = std::collections::HashMap::new();
        metadata.insert("role".to_string(), "worker".to_string());

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_token)
            .json(&CreateMachineRequest {
                config: CreateMachineConfig { metadata },
            })
            .send()
            .await
            .context("creating machine")?;

        if !response.status().is_success() {
            bail!("create machine failed: {}", response.status());
        }
        Ok(())
    }

    async fn destroy_machine(&self, id: &str) -> Result<()> {
        let url = format!(
            "{}/v1/apps/{}/machines/{id}",
            self.api_base, self.app_name
        );
        let response = self
            .client
            .delete(url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .context("destroying machine")?;

        if !response.status().is_success() {
            bail!("destroy machine {id} failed: {}", response.status());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_first_ordering() {
        let mut machines = vec![
            Machine {
                id: "b".to_string(),
                created_at: "2026-01-02T00:00:00Z".to_string(),
                metadata: std::collections::HashMap::new(),
            },
            Machine {
                id: "a".to_string(),
                created_at: "2026-01-01T00:00:00Z".to_string(),
                metadata: std::collections::HashMap::new(),
            },
        ];
        machines.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        assert_eq!(machines[0].id, "a");
    }
}
