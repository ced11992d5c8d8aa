use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Transfer buffer used when neither endpoint asks for something else.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Relay tuning, usually embedded in the host application's config file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelayParams {
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

impl Default for RelayParams {
    fn default() -> Self {
        RelayParams {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl RelayParams {
    pub fn from_yaml(s: &str) -> Result<Self> {
        let params: RelayParams = serde_yaml_ng::from_str(s).context("parse yaml")?;
        params.validate()?;
        Ok(params)
    }

    pub async fn load(path: &str) -> Result<Self> {
        let s = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read file {}", path))?;
        Self::from_yaml(&s)
    }

    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            bail!("bufferSize must be greater than zero");
        }
        Ok(())
    }
}
