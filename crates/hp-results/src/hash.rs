//! Content-based hashing for configuration and run ids.

use hp_project::HeatPumpConfig;
use sha2::{Digest, Sha256};

/// Identifies the model a configuration builds.
///
/// Dataset column candidates do not change the solved cycle and are left out,
/// so a design state stays valid when only the column mapping is edited.
pub fn compute_config_id(config: &HeatPumpConfig) -> String {
    let mut hasher = Sha256::new();

    hasher.update(config.version.to_le_bytes());
    hasher.update(config.working_fluid.as_bytes());

    let design_json = serde_json::to_string(&config.design).unwrap_or_default();
    hasher.update(design_json.as_bytes());

    let solver_json = serde_json::to_string(&config.solver).unwrap_or_default();
    hasher.update(solver_json.as_bytes());

    format!("{:x}", hasher.finalize())
}

/// Identifies a run: the configuration, how the input tables were read
/// (layout and resolved columns), and the digests of their contents.
pub fn compute_run_id(
    config_id: &str,
    dataset_layout: &str,
    dataset_digests: &[String],
    tool_version: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(config_id.as_bytes());
    hasher.update(dataset_layout.as_bytes());
    for digest in dataset_digests {
        hasher.update(digest.as_bytes());
    }
    hasher.update(tool_version.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn digest_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
