//! Recycle bin report
//!
//! Queries each requested root and prints what could be reclaimed. A root
//! whose query fails is shown as empty with its status code; it never
//! aborts the report.

use anyhow::Result;
use colored::Colorize;
use recyclebin::{RecycleBinStats, RootReport};
use serde::Serialize;
use settings::SettingsStore;

use crate::Context;
use crate::cli::BinArgs;
use crate::ui;

/// Setting holding the default roots, separated by `;`
const ROOTS_SETTING: (&str, &str) = ("RecycleBin", "Roots");

#[derive(Serialize)]
struct BinReport {
    roots: Vec<RootReport>,
    total: RecycleBinStats,
}

pub fn run(ctx: &Context, args: BinArgs) -> Result<()> {
    let roots = if args.roots.is_empty() {
        let store = ctx.open_settings()?;
        default_roots(&store)
    } else {
        args.roots
    };

    let mut query = recyclebin::default_query();
    let (total, reports) = recyclebin::query_many(query.as_mut(), &roots);

    if args.json {
        let report = BinReport {
            roots: reports,
            total,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    ui::header("Recycle Bin");
    for report in &reports {
        print_report(report);
    }

    if reports.len() > 1 {
        println!();
        ui::kv(
            "Total",
            &format!("{} items, {}", total.items, ui::format_size(total.bytes)),
        );
    }

    if total.is_empty() && !ctx.quiet {
        ui::dim("Nothing to reclaim");
    }

    Ok(())
}

/// Roots from settings, or every bin when none are configured.
fn default_roots(store: &SettingsStore) -> Vec<String> {
    let configured = store.read_str(ROOTS_SETTING.0, ROOTS_SETTING.1, "");
    let roots: Vec<String> = configured
        .split(';')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
        .collect();

    if roots.is_empty() {
        vec![String::new()]
    } else {
        log::debug!("Using configured recycle bin roots: {roots:?}");
        roots
    }
}

fn print_report(report: &RootReport) {
    let label = ui::root_label(&report.root);
    if report.status.succeeded() {
        println!(
            "  {} {:<20} {} items, {}",
            "✓".green(),
            label.cyan(),
            report.stats.items,
            ui::format_size(report.stats.bytes)
        );
    } else {
        println!(
            "  {} {:<20} {}",
            "○".yellow(),
            label.cyan(),
            format!("unavailable ({})", report.status).dimmed()
        );
    }
}
