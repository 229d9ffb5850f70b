use anyhow::{Context, Result};
use std::time::Instant;
use wine_report::{
    cli::{Cli, Commands},
    dashboard::DashboardData,
    logging,
    map::MapRenderer,
    report::Report,
    schema::ddl,
    store::with_store,
    ui::{DashboardView, UiApp},
};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Dashboard { db } => {
            // Load everything before touching the terminal so a failing report leaves no half-drawn screen
            let renderer = MapRenderer::new();
            let data = with_store(&db, |store| DashboardData::load(store, &renderer))
                .with_context(|| format!("Failed to load reports from {:?}", db))?;
            let view = DashboardView::new(&data).context("Failed to prepare dashboard")?;

            UiApp::new(view)?.run()?;
        }

        Commands::Report {
            report,
            db,
            top,
            json,
        } => {
            let table = with_store(&db, |store| store.run(report))
                .with_context(|| format!("Failed to run report {}", report))?;
            let table = match top {
                Some(n) => table.head(n),
                None => table,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                print!("{}", table);
            }
        }

        Commands::Map {
            db,
            output,
            top,
            tiles,
        } => {
            let start = Instant::now();

            let table = with_store(&db, |store| store.avg_price_per_country())
                .context("Failed to load average price per country")?;
            let table = match top {
                Some(n) => table.head(n),
                None => table,
            };

            let map = MapRenderer::new().tiles(tiles).render(&table)?;
            map.save(&output)?;

            println!(
                "Wrote {:?} ({} of {} countries located) in {:.1}s",
                output,
                map.marker_count(),
                table.len(),
                start.elapsed().as_secs_f64()
            );
        }

        Commands::ListReports => {
            println!("Available reports:\n");
            for report in Report::ALL {
                println!("  {:<24} {}", report.name(), report.description());
            }
        }

        Commands::Schema => {
            print!("{}", ddl());
        }
    }

    Ok(())
}
