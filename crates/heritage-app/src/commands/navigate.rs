use anyhow::Result;
use colored::Colorize;
use heritage_app::{build_navigator, AppConfig};
use heritage_router::{NavigationOutcome, ResolvedView, RouterError, ViewMount};

/// Prints every view it is asked to mount
struct ConsoleMount;

impl ViewMount for ConsoleMount {
    fn mount(&self, view: &ResolvedView) {
        let props = view
            .props
            .as_ref()
            .map(|props| format!(" props={:?}", props))
            .unwrap_or_default();
        println!(
            "  {} {} ({}){}",
            "mount".green(),
            view.view.to_string().cyan(),
            view.route,
            props
        );
    }

    fn not_found(&self, location: &str) {
        println!("  {} {}", "not found".red(), location);
    }
}

pub async fn execute(config: &AppConfig, locations: &[String]) -> Result<()> {
    let navigator = build_navigator(config, ConsoleMount)?;

    for location in locations {
        println!("{} {}", "→".bold(), location);
        match navigator.navigate(location).await {
            Ok(NavigationOutcome::Mounted(_)) => {}
            Ok(NavigationOutcome::Superseded { .. }) => println!("  superseded"),
            // already reported by the mount
            Err(RouterError::NotFound(_)) => {}
            Err(err) => println!("  {} {}", "error".red().bold(), err),
        }
    }

    let stats = navigator.modules().stats().await;
    println!();
    println!("{}", "Deferred modules".green().bold());
    println!("  loaded:   {}", navigator.modules().loaded_routes().await.join(", "));
    println!(
        "  fetches:  {}  hits: {}  failures: {}",
        stats.fetches, stats.hits, stats.failures
    );

    Ok(())
}
