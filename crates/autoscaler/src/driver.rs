//! Orchestrator driver abstraction: list the current worker count, scale to
//! a target count. Exactly two implementations exist, so this is modeled as
//! a closed enum dispatching to each rather than a trait object — avoids
//! boxing futures for a set that will never grow past two.

pub mod cloud;
pub mod compose;

pub use cloud::CloudMachinesDriver;
pub use compose::ComposeDriver;

pub enum Driver {
    Compose(ComposeDriver),
    Cloud(CloudMachinesDriver),
}

impl Driver {
    pub async fn list_workers(&self) -> anyhow::Result<u32> {
        match self {
            Driver::Compose(d) => d.list_workers().await,
            Driver::Cloud(d) => d.list_workers().await,
        }
    }

    pub async fn scale_to(&self, count: u32) -> anyhow::Result<()> {
        match self {
            Driver::Compose(d) => d.scale_to(count).await,
            Driver::Cloud(d) => d.scale_to(count).await,
        }
    }
}
