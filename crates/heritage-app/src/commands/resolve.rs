use anyhow::Result;
use colored::Colorize;
use heritage_app::{routes::build_table, AppConfig};
use heritage_router::{Component, RouterError};
use serde_json::json;

pub fn execute(config: &AppConfig, location: &str, as_json: bool) -> Result<()> {
    let table = build_table(&config.routing)?;

    let route_match = match table.resolve(location) {
        Ok(route_match) => route_match,
        Err(RouterError::NotFound(path)) if as_json => {
            println!("{}", json!({ "location": location, "path": path, "matched": false }));
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let route = route_match.route;
    let (loading, target) = match &route.component {
        Component::Eager(view) => ("eager", view.to_string()),
        Component::Deferred { chunk } => ("deferred", chunk.clone()),
    };

    if as_json {
        let value = json!({
            "location": location,
            "matched": true,
            "route": route.name,
            "pattern": route.pattern,
            "loading": loading,
            "target": target,
            "params": route_match.params,
            "props": route_match.props,
            "path": route_match.location.path,
            "query": route_match.location.query,
            "hash": route_match.location.hash,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} {}", "Matched".green().bold(), route.name.cyan());
    println!("  pattern: {}", route.pattern);
    println!("  {}: {}", loading, target);

    let mut params: Vec<_> = route_match.params.iter().collect();
    params.sort();
    for (key, value) in params {
        println!("  param {} = {}", key.yellow(), value);
    }
    if route_match.props.is_some() {
        println!("  params forwarded as view props");
    }

    Ok(())
}
