//! Configuration binding tests
//!
//! Tests for layering defaults, configuration files and environment
//! variables onto the property tree, and for writing configuration files.

use initparams::{
    cli::export_parameters,
    config::{
        init_default_config, primefaces_params, save_config, ConfigLoader, Direction,
        JsfProperties, ProjectStage, SubmitMode, UploaderMode, PROPERTY_PREFIX,
    },
    error::Result,
    export::describe_schema,
    utils::{OutputFormat, TableFormatter},
    InitParamsError,
};
use std::fs;
use tempfile::TempDir;

fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_toml_file_overrides_defaults() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "app.toml",
        r#"
[faces]
project_stage = "Production"
facelets_refresh_period = -1

[primefaces]
theme = "bootstrap"
uploader = "native"
cache_provider = "org.primefaces.cache.HazelcastCacheProvider"

[primefaces.mobile]
theme = "mobile-x"
"#,
    );

    let properties = ConfigLoader::isolated()
        .without_env()
        .with_config_file(&path)
        .load()
        .await?;

    assert_eq!(properties.faces.project_stage, Some(ProjectStage::Production));
    assert_eq!(properties.faces.facelets_refresh_period, Some(-1));
    assert_eq!(properties.primefaces.theme.as_deref(), Some("bootstrap"));
    assert_eq!(properties.primefaces.uploader, Some(UploaderMode::Native));
    assert_eq!(properties.primefaces.mobile.theme.as_deref(), Some("mobile-x"));
    assert_eq!(
        properties
            .primefaces
            .cache_provider
            .as_ref()
            .map(|p| p.qualified_name()),
        Some("org.primefaces.cache.HazelcastCacheProvider")
    );
    // Untouched fields keep their defaults
    assert_eq!(properties.primefaces.submit, Some(SubmitMode::Full));
    assert_eq!(properties.primefaces.secret.as_deref(), Some("primefaces"));

    Ok(())
}

#[tokio::test]
async fn test_json_null_unsets_a_default() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "app.json", r#"{ "primefaces": { "submit": null } }"#);

    let loader = ConfigLoader::isolated().without_env().with_config_file(&path);
    let properties = loader.load().await?;
    assert_eq!(properties.primefaces.submit, None);

    let parameters = export_parameters(&loader, false).await?;
    assert!(!parameters.contains_key("primefaces.SUBMIT"));
    assert_eq!(parameters.get("primefaces.THEME"), Some("aristo"));

    Ok(())
}

#[tokio::test]
async fn test_yaml_file() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "app.yaml",
        "primefaces:\n  dir: rtl\n  client_side_validation: true\n",
    );

    let properties = ConfigLoader::isolated()
        .without_env()
        .with_config_file(&path)
        .load()
        .await?;

    assert_eq!(properties.primefaces.dir, Some(Direction::Rtl));
    assert!(properties.primefaces.client_side_validation);

    Ok(())
}

#[tokio::test]
async fn test_environment_wins_over_file() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "app.toml", "[primefaces]\ntheme = \"bootstrap\"\n");

    let properties = ConfigLoader::isolated()
        .with_config_file(&path)
        .with_env_source(env(&[
            ("JSF_PRIMEFACES__THEME", "omega"),
            ("JSF_FACES__FACELETS_SKIP_COMMENTS", "true"),
        ]))
        .load()
        .await?;

    assert_eq!(properties.primefaces.theme.as_deref(), Some("omega"));
    assert_eq!(properties.faces.facelets_skip_comments, Some(true));

    Ok(())
}

#[tokio::test]
async fn test_environment_strings_are_kept_verbatim() -> Result<()> {
    let loader = ConfigLoader::isolated().with_env_source(env(&[
        ("JSF_PRIMEFACES__SECRET", "007"),
        ("JSF_PRIMEFACES__PUBLIC_CAPTCHA_KEY", "1.50"),
        ("JSF_PRIMEFACES__THEME", "TRUE"),
        ("JSF_PRIMEFACES__AUTO_UPDATE", "true"),
    ]));

    let parameters = export_parameters(&loader, false).await?;

    assert_eq!(parameters.get(primefaces_params::SECRET_KEY), Some("007"));
    assert_eq!(parameters.get(primefaces_params::PUBLIC_CAPTCHA_KEY), Some("1.50"));
    assert_eq!(parameters.get(primefaces_params::THEME), Some("TRUE"));
    assert_eq!(parameters.get(primefaces_params::AUTO_UPDATE), Some("true"));

    Ok(())
}

#[tokio::test]
async fn test_described_env_names_are_bound() -> Result<()> {
    let entries = describe_schema(&JsfProperties::default(), PROPERTY_PREFIX)?;
    let listing = TableFormatter::new(OutputFormat::Env, true).format_schema(&entries)?;

    let name = listing
        .lines()
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split_once('=').map(|(name, _)| name))
        .find(|name| name.contains("MOBILE"))
        .unwrap()
        .to_string();

    let properties = ConfigLoader::isolated()
        .with_env_source(env(&[(name.as_str(), "mobile-x")]))
        .load()
        .await?;

    assert_eq!(properties.primefaces.mobile.theme.as_deref(), Some("mobile-x"));

    Ok(())
}

#[tokio::test]
async fn test_symbolic_values_ignore_case() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "app.yaml", "primefaces:\n  dir: RTL\n  uploader: Native\n");

    let properties = ConfigLoader::isolated()
        .with_config_file(&path)
        .with_env_source(env(&[("JSF_PRIMEFACES__SUBMIT", "Partial")]))
        .load()
        .await?;

    assert_eq!(properties.primefaces.dir, Some(Direction::Rtl));
    assert_eq!(properties.primefaces.uploader, Some(UploaderMode::Native));
    assert_eq!(properties.primefaces.submit, Some(SubmitMode::Partial));

    Ok(())
}

#[tokio::test]
async fn test_explicit_file_wins_over_user_file() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let user = write(&dir, "user.toml", "[primefaces]\ntheme = \"user\"\nsecret = \"s3cret\"\n");
    let explicit = write(&dir, "explicit.toml", "[primefaces]\ntheme = \"explicit\"\n");

    let properties = ConfigLoader::isolated()
        .without_env()
        .with_user_config(Some(&user))
        .with_config_file(&explicit)
        .load()
        .await?;

    assert_eq!(properties.primefaces.theme.as_deref(), Some("explicit"));
    assert_eq!(properties.primefaces.secret.as_deref(), Some("s3cret"));

    Ok(())
}

#[tokio::test]
async fn test_invalid_cache_provider_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "app.toml", "[primefaces]\ncache_provider = \"NotQualified\"\n");

    let result = ConfigLoader::isolated()
        .without_env()
        .with_config_file(&path)
        .load()
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_blank_theme_fails_validation_only() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "app.toml", "[primefaces]\ntheme = \"  \"\n");
    let loader = ConfigLoader::isolated().without_env().with_config_file(&path);

    assert!(matches!(
        loader.load().await,
        Err(InitParamsError::ConfigError(_))
    ));
    assert!(loader.load_no_validation().await.is_ok());
}

#[tokio::test]
async fn test_init_writes_loadable_defaults() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("initparams.toml");

    assert!(init_default_config(&path, false).await?);
    assert!(!init_default_config(&path, false).await?);

    let properties = ConfigLoader::isolated()
        .without_env()
        .with_config_file(&path)
        .load()
        .await?;
    assert_eq!(properties, JsfProperties::default());

    Ok(())
}

#[tokio::test]
async fn test_init_force_replaces_file() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("initparams.toml");

    let mut custom = JsfProperties::default();
    custom.primefaces.theme = Some("custom".to_string());
    save_config(&path, &custom).await?;

    assert!(!init_default_config(&path, false).await?);
    assert!(fs::read_to_string(&path).unwrap().contains("custom"));

    assert!(init_default_config(&path, true).await?);
    assert!(!fs::read_to_string(&path).unwrap().contains("custom"));

    Ok(())
}
