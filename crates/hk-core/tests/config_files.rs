//! Loading run configurations from disk.

use hk_core::config::{default_config_toml, ConfigError, SimulationConfig};
use hk_core::runner::run_simulation;
use hk_core::{HkError, Parameter, Regime, Termination};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_file_runs() {
    let file = write_config(&default_config_toml());
    let config = SimulationConfig::from_file(file.path()).unwrap();
    assert_eq!(config, SimulationConfig::from_str(&default_config_toml()).unwrap());

    let summary = run_simulation(&config).unwrap();
    assert_eq!(summary.termination, Termination::Converged);
    assert_eq!(summary.final_profile.len(), 50);
}

#[test]
fn test_ode_file_with_radicals() {
    let file = write_config(
        r#"
        [model]
        radius = 0.25

        [population]
        agents = 10
        initial = "uniform"
        radicals = [0.0, 1.0]
        radical_count = 2

        [integration]
        regime = "ode"
        step_size = 0.05
        max_steps = 400
        result = "terminal"
        "#,
    );

    let config = SimulationConfig::from_file(file.path()).unwrap();
    assert_eq!(config.integration.regime, Regime::Ode);

    let summary = run_simulation(&config).unwrap();
    assert_eq!(summary.final_profile.len(), 12);
    assert_eq!(summary.radical_indices, vec![0, 11]);
    assert!(summary.steps <= 400);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SimulationConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_load_reports_config_errors_as_run_errors() {
    let dir = tempfile::tempdir().unwrap();
    let err = SimulationConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, HkError::Config(ConfigError::Io(_))));
    assert_eq!(err.parameter(), None);

    let file = write_config("[model]\ndimension = 3");
    let err = SimulationConfig::load(file.path()).unwrap_err();
    assert_eq!(err.parameter(), Some(Parameter::InitialProfile));

    let file = write_config(&default_config_toml());
    assert_eq!(
        SimulationConfig::load(file.path()).unwrap(),
        SimulationConfig::from_str(&default_config_toml()).unwrap()
    );
}

#[test]
fn test_radical_outside_domain_is_rejected() {
    let file = write_config(
        r#"
        [population]
        radicals = [1.7]

        [integration]
        regime = "sde"
        boundary = "absorb"
        noise = 0.05
        "#,
    );

    let config = SimulationConfig::load(file.path()).unwrap();
    let err = run_simulation(&config).unwrap_err();
    assert_eq!(err.parameter(), Some(Parameter::Radicals));
}

#[test]
fn test_unsupported_settings_are_rejected() {
    let file = write_config(
        r#"
        [model]
        dimension = 2

        [population]
        initial = "uniform"

        [integration]
        regime = "sde"
        boundary = "period"
        "#,
    );

    let config = SimulationConfig::from_file(file.path()).unwrap();
    let err = run_simulation(&config).unwrap_err();
    assert!(matches!(err, HkError::InvalidParameter { parameter: Parameter::Boundary, .. }));
}

#[test]
fn test_config_error_converts_into_run_error() {
    fn load(content: &str) -> Result<SimulationConfig, HkError> {
        Ok(SimulationConfig::from_str(content)?)
    }

    let err = load("[integration]\nregime = \"leapfrog\"").unwrap_err();
    assert!(matches!(err, HkError::Config(ConfigError::Toml(_))));
    assert_eq!(err.parameter(), None);
}
