use crate::error::{Result, ScorerError};
use crate::types::config::ScorerConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "adscore.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".adscore/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/adscore/config.toml";

/// Loads global, project and local overrides, in that order.
///
/// `explicit` replaces the project file and must exist.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<ScorerConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, explicit, global.as_deref())
}

/// Where a configuration file sits in the override order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigLayer {
    Global,
    Project,
    Explicit,
    Local,
}

impl ConfigLayer {
    fn name(self) -> &'static str {
        match self {
            ConfigLayer::Global => "global",
            ConfigLayer::Project => "project",
            ConfigLayer::Explicit => "--config",
            ConfigLayer::Local => "local",
        }
    }
}

pub(crate) fn load_config_with_global(
    root: &Path,
    explicit: Option<&Path>,
    global_path: Option<&Path>,
) -> Result<ScorerConfig> {
    let project = match explicit {
        Some(path) if !path.exists() => {
            return Err(ScorerError::ConfigParse(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Some(path) => (ConfigLayer::Explicit, path.to_path_buf()),
        None => (ConfigLayer::Project, root.join(DEFAULT_CONFIG_FILE)),
    };

    let layers = global_path
        .map(|path| (ConfigLayer::Global, path.to_path_buf()))
        .into_iter()
        .chain([project, (ConfigLayer::Local, root.join(DEFAULT_LOCAL_FILE))]);

    let mut merged = Value::Table(Map::new());
    for (layer, path) in layers {
        if !path.exists() {
            continue;
        }
        info!(layer = layer.name(), path = %path.display(), "applying config layer");
        overlay(&mut merged, read_layer(layer, &path)?);
    }

    merged
        .try_into()
        .map_err(|e: toml::de::Error| ScorerError::ConfigParse(e.to_string()))
}

fn read_layer(layer: ConfigLayer, path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| {
        ScorerError::ConfigParse(format!("{} layer {}: {}", layer.name(), path.display(), e))
    })
}

/// Later layers win key by key; a non-table value replaces whatever it meets.
fn overlay(base: &mut Value, layer: Value) {
    match layer {
        Value::Table(entries) if base.is_table() => {
            let Some(table) = base.as_table_mut() else {
                return;
            };
            for (key, value) in entries {
                match table.get_mut(&key) {
                    Some(existing) => overlay(existing, value),
                    None => {
                        table.insert(key, value);
                    }
                }
            }
        }
        value => *base = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::components::Component;
    use crate::model::features::FeatureId;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_defaults_when_no_files_exist() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None, None).expect("load should not fail");
        assert!(cfg.model.is_none());
        assert!(cfg.components.is_none());
    }

    #[test]
    fn load_config_rejects_missing_explicit_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let missing = dir.path().join("nope.toml");
        let err = load_config_with_global(dir.path(), Some(&missing), None)
            .expect_err("explicit file must exist");
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_config_merges_global_project_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[model]
bias = 1.0

[model.weights]
F1 = 0.9

[tags]
scale = 80.0
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[model.weights]
F29_PainPointMatch = 0.4

[components.roas]
max_score = 50.0
"#,
        )
        .expect("project config should write");

        fs::create_dir_all(root.path().join(".adscore")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[model]
bias = -0.5
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), None, Some(&global_path))
            .expect("load should succeed");
        let model = cfg.build_model().expect("merged config should build");

        assert_eq!(model.linear().bias, -0.5);
        assert_eq!(model.linear().weight(FeatureId::PrimaryFocus), 0.9);
        assert_eq!(model.linear().weight(FeatureId::PainPointMatch), 0.4);
        assert_eq!(model.thresholds().scale, 80.0);
        assert_eq!(
            model
                .partition()
                .spec(Component::Roas)
                .map(|spec| spec.max_score),
            Some(50.0)
        );
    }

    #[test]
    fn explicit_file_replaces_project_file() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            "[model]\nbias = 3.0\n",
        )
        .expect("project config should write");
        let explicit = root.path().join("alt.toml");
        fs::write(&explicit, "[model]\nbias = 2.0\n").expect("explicit config should write");

        let cfg = load_config_with_global(root.path(), Some(&explicit), None)
            .expect("load should succeed");
        assert_eq!(cfg.model.and_then(|model| model.bias), Some(2.0));
    }

    #[test]
    fn malformed_toml_names_the_file() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[model\nbias = ")
            .expect("project config should write");
        let err = load_config_with_global(root.path(), None, None).expect_err("should fail");
        let message = err.to_string();
        assert!(message.contains(DEFAULT_CONFIG_FILE));
        assert!(message.contains("project layer"));
    }

    #[test]
    fn malformed_local_override_names_its_layer() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::create_dir_all(root.path().join(".adscore")).expect("local dir should create");
        fs::write(root.path().join(DEFAULT_LOCAL_FILE), "bias = = 1")
            .expect("local override should write");
        let err = load_config_with_global(root.path(), None, None).expect_err("should fail");
        assert!(err.to_string().contains("local layer"));
    }

    #[test]
    fn overlay_replaces_scalars_and_keeps_sibling_keys() {
        let mut base: Value = toml::from_str("[model]\nbias = 1.0\n[model.weights]\nF1 = 0.5\n")
            .expect("base should parse");
        let layer: Value =
            toml::from_str("[model.weights]\nF2 = 0.25\n").expect("layer should parse");
        overlay(&mut base, layer);
        assert_eq!(base["model"]["bias"].as_float(), Some(1.0));
        assert_eq!(base["model"]["weights"]["F1"].as_float(), Some(0.5));
        assert_eq!(base["model"]["weights"]["F2"].as_float(), Some(0.25));
    }
}
