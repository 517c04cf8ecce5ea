use crate::records::Plan;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallyConfig {
    pub gateway: GatewayConfig,
    pub clock: ClockConfig,
    pub upload: UploadConfig,
}

/// Endpoint of the managed backend this client talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub project_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Period of the elapsed-time tick while a session is running.
    pub tick_interval: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_upload_bytes: u64,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig {
                endpoint: "https://api.tally.app".into(),
                project_id: "tally".into(),
            },
            clock: ClockConfig {
                tick_interval: Duration::from_secs(1),
            },
            upload: UploadConfig {
                max_upload_bytes: Plan::Free.max_upload_bytes(),
            },
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        TallyConfig::default().clock
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        TallyConfig::default().upload
    }
}
