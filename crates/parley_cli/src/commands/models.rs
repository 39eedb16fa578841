//! `parley models`

use anyhow::Result;
use parley_runtime::{ModelCatalog, RuntimeConfig};
use serde::Serialize;

use crate::output;

#[derive(Serialize)]
struct ModelRow<'a> {
    name: &'a str,
    deployment: &'a str,
    images: bool,
    default: bool,
}

pub fn handle() -> Result<()> {
    let config = RuntimeConfig::from_env()?;
    let current = config.initial_model().ok().map(|m| m.display_name);

    output::header(&format!("Models ({})", config.provider));
    print_catalog(&config.catalog, current.as_deref());
    Ok(())
}

/// Table of the catalog, marking `current` when given.
pub fn print_catalog(catalog: &ModelCatalog, current: Option<&str>) {
    let rows: Vec<ModelRow<'_>> = catalog
        .models()
        .iter()
        .map(|m| ModelRow {
            name: &m.display_name,
            deployment: &m.deployment_id,
            images: m.supports_image_input,
            default: current == Some(m.display_name.as_str()),
        })
        .collect();

    let mut table = output::table();
    output::table_header(&mut table, &["Model", "Deployment", "Images", ""]);
    for row in &rows {
        output::table_row(
            &mut table,
            &[
                row.name,
                row.deployment,
                if row.images { "yes" } else { "no" },
                if row.default { "*" } else { "" },
            ],
        );
    }
    output::table_print(&table, &rows);
}
