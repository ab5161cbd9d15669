use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};

use crate::models::{LicenseFinding, Organization};

const SPINNER_FRAMES: &str = "|/-\\";
const SPINNER_CYCLES: usize = 10;
const SPINNER_FRAME_DELAY: Duration = Duration::from_millis(100);

/// Spin a one-line indicator captioned with the organization, then clear it.
pub async fn show_progress(org: &Organization) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    // the trailing space is the "finished" frame
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{msg} {spinner}")?
            .tick_chars(&format!("{} ", SPINNER_FRAMES)),
    );
    pb.set_message(progress_caption(org));

    for _ in 0..SPINNER_CYCLES * SPINNER_FRAMES.len() {
        pb.tick();
        tokio::time::sleep(SPINNER_FRAME_DELAY).await;
    }

    pb.finish_and_clear();
    Ok(())
}

pub fn progress_caption(org: &Organization) -> String {
    format!(
        "Checking licenses for Organization: {} (ID: {})",
        org.name, org.id
    )
}

pub fn report_written(org: &Organization, path: &Path, findings: &[LicenseFinding]) {
    println!(
        " {} {} high severity license(s) for {} → {}",
        "✓".green(),
        findings.len(),
        org.name.as_str().bold(),
        path.display()
    );
}

pub fn total_line(total: usize) -> String {
    format!(
        "Overall Total number of high severity licenses across all organizations: {}",
        total
    )
}

/// Print the aggregate count and the per-organization table.
pub fn render_summary(
    organizations: &[Organization],
    findings_by_org: &HashMap<String, Vec<LicenseFinding>>,
    total: usize,
) {
    println!("\n{}", total_line(total));
    println!("{}", summary_table(organizations, findings_by_org));
}

/// One row per organization whose fetch succeeded, in configured order.
pub fn summary_table(
    organizations: &[Organization],
    findings_by_org: &HashMap<String, Vec<LicenseFinding>>,
) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Organization Name").add_attribute(Attribute::Bold),
            Cell::new("Organization ID").add_attribute(Attribute::Bold),
            Cell::new("Number of High Severity Licenses").add_attribute(Attribute::Bold),
        ]);

    for org in organizations {
        let Some(findings) = findings_by_org.get(&org.id) else {
            continue;
        };
        table.add_row(vec![
            Cell::new(&org.name),
            Cell::new(&org.id),
            Cell::new(findings.len()).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}
