use super::types::Catalog;
use anyhow::Context;
use std::path::Path;
use tracing::info;

/// Load a handler catalogue from a YAML (`.yaml`/`.yml`) or JSON file.
pub fn load_catalog(file_path: impl AsRef<Path>) -> anyhow::Result<Catalog> {
    let path = file_path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let catalog = if is_yaml {
        Catalog::from_yaml_str(&content)
    } else {
        Catalog::from_json_str(&content)
    }
    .with_context(|| format!("failed to parse catalog {}", path.display()))?;

    info!(
        catalog = %path.display(),
        owners = catalog.owners.len(),
        handlers = catalog.owners.iter().map(|o| o.handlers.len()).sum::<usize>(),
        "Handler catalog loaded"
    );
    Ok(catalog)
}
