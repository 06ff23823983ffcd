use anyhow::Result;
use colored::Colorize;
use heritage_app::{routes::build_table, AppConfig};
use heritage_router::Component;

pub fn execute(config: &AppConfig) -> Result<()> {
    let table = build_table(&config.routing)?;

    println!("{}", "Route table".green().bold());
    let base = if table.base().is_empty() { "/" } else { table.base() };
    println!("base: {}", base.cyan());
    println!(
        "case-insensitive: {}",
        if table.is_case_insensitive() { "yes" } else { "no" }
    );
    println!();

    for route in table.routes() {
        let loading = match &route.component {
            Component::Eager(view) => format!("eager    {}", view),
            Component::Deferred { chunk } => format!("deferred chunk:{}", chunk),
        };
        let props = if route.props_from_params { "props" } else { "" };

        println!(
            "  {:<20} {:<22} {:<32} {}",
            route.name.cyan(),
            route.pattern,
            loading,
            props.yellow()
        );
    }

    Ok(())
}
