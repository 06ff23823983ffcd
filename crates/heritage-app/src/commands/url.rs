use anyhow::{Context, Result};
use heritage_app::{routes::build_table, AppConfig};
use std::collections::HashMap;

pub fn execute(config: &AppConfig, name: &str, params: Vec<(String, String)>) -> Result<()> {
    let table = build_table(&config.routing)?;

    let route = table
        .get_route_by_name(name)
        .with_context(|| format!("no route named `{name}`"))?;

    let params: HashMap<String, String> = params.into_iter().collect();
    let href = table.href(name, &params).with_context(|| {
        format!(
            "route `{}` ({}) needs parameters: {}",
            name,
            route.pattern,
            route.params.join(", ")
        )
    })?;

    println!("{}", href);
    Ok(())
}
