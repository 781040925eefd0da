//! Manager reports

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use hotel_client::AppRoute;
use hotel_client::reports::{ExportFormat, export_report, fetch_report};
use shared::models::{ReportKind, ReportQuery};

use super::{Portal, wire};

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// occupancy, sales or dashboard
    kind: String,

    /// Range start (YYYY-MM-DD); not used by the dashboard
    #[arg(long, required_unless_present = "period")]
    from: Option<NaiveDate>,
    #[arg(long, required_unless_present = "period")]
    to: Option<NaiveDate>,

    /// Dashboard period in days
    #[arg(long)]
    period: Option<u32>,

    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    payment_method: Option<String>,

    /// Print or save as json or csv
    #[arg(long, default_value = "json")]
    format: ExportFormat,

    /// Save under the exports directory instead of printing
    #[arg(long)]
    save: bool,
}

pub async fn run(portal: &mut Portal, args: ReportArgs) -> Result<()> {
    let allowed = AppRoute::ManagerDashboard
        .allowed_roles()
        .unwrap_or_default();
    portal.require(allowed)?;

    if args.kind == "dashboard" {
        let period = args.period.unwrap_or(30);
        let result = portal.store.api().dashboard(period).await;
        let snapshot = portal.settle(result)?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let kind: ReportKind = wire(&args.kind).map_err(anyhow::Error::msg)?;
    let (Some(from), Some(to)) = (args.from, args.to) else {
        anyhow::bail!("--from and --to are required for the {} report", kind);
    };
    let query = ReportQuery {
        start_date: from,
        end_date: to,
        category: args.category,
        status: args.status,
        payment_method: args.payment_method,
    };

    let result = fetch_report(portal.store.api(), kind, &query).await;
    let snapshot = portal.settle(result)?;
    let result = export_report(kind, &query, &snapshot, args.format);
    let export = portal.settle(result)?;

    if args.save {
        let result = export.save(&portal.config.export_dir());
        let path = portal.settle(result)?;
        println!("Saved {}", path.display());
    } else {
        print!("{}", export.body);
        if args.format == ExportFormat::Json {
            println!();
        }
    }
    Ok(())
}
