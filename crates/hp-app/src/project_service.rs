//! Configuration loading, saving, validation and summary.

use std::path::Path;

use hp_project::HeatPumpConfig;

use crate::error::{AppError, AppResult};

/// Summary of a configuration for display.
#[derive(Debug, Clone)]
pub struct ConfigSummary {
    pub name: String,
    pub version: u32,
    pub working_fluid: String,
    pub config_id: String,
    pub q_cond_kw: f64,
    pub q_evap_kw: f64,
}

/// Load a configuration (YAML, or JSON by extension) and validate it.
pub fn load_config(path: &Path) -> AppResult<HeatPumpConfig> {
    if !path.exists() {
        return Err(AppError::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
        });
    }
    Ok(hp_project::load_config(path)?)
}

pub fn save_config(path: &Path, config: &HeatPumpConfig) -> AppResult<()> {
    Ok(hp_project::save_config(path, config)?)
}

/// Write the default configuration. Refuses to overwrite unless `force`.
pub fn init_config(path: &Path, force: bool) -> AppResult<HeatPumpConfig> {
    if path.exists() && !force {
        return Err(AppError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    let config = HeatPumpConfig::default();
    save_config(path, &config)?;
    Ok(config)
}

pub fn summarize(config: &HeatPumpConfig) -> ConfigSummary {
    ConfigSummary {
        name: config.name.clone(),
        version: config.version,
        working_fluid: config.working_fluid.clone(),
        config_id: hp_results::compute_config_id(config),
        q_cond_kw: config.design.condenser.q_kw,
        q_evap_kw: config.design.evaporator.q_kw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_refuses_to_overwrite() {
        let path = std::env::temp_dir().join("hp_app_init_config.yaml");
        let _ = std::fs::remove_file(&path);

        init_config(&path, false).unwrap();
        assert!(init_config(&path, false).is_err());
        init_config(&path, true).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, HeatPumpConfig::default());
        assert_eq!(summarize(&loaded).working_fluid, "R134a");
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = load_config(Path::new("/nonexistent/heatpump.yaml")).unwrap_err();
        assert!(matches!(err, AppError::FileRead { .. }));
    }
}
