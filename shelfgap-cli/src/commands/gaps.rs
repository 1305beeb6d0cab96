use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelfgap_import::{GapClass, MatchKind, ReportOptions, report_gaps};

use crate::CliError;

use super::{CommandStatus, default_db_path, open_db, resolve_franchise};

/// Diff a reference list against the store and report the gaps.
pub(crate) fn run_report_gaps(
    franchise: String,
    reference: PathBuf,
    record: bool,
    json: bool,
    db_path: Option<PathBuf>,
) -> Result<CommandStatus, CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let conn = open_db(&db_path)?;
    let franchise = resolve_franchise(&conn, &franchise)?;

    let text = std::fs::read_to_string(&reference)?;
    let options = ReportOptions {
        record_ambiguous: record,
    };

    let report = report_gaps(&conn, &franchise.id, &text, &options)
        .map_err(|e| CliError::database(e.to_string()))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::other(e.to_string()))?,
        );
    } else {
        log::info!(
            "{}",
            format!(
                "Gap report for {} against {}",
                franchise.name,
                reference.display(),
            )
            .if_supports_color(Stdout, |t| t.bold()),
        );
        crate::log_blank();

        for item in &report.items {
            let year = item
                .year
                .map(|y| format!(" ({y})"))
                .unwrap_or_default();
            match &item.class {
                GapClass::Present { matched, .. } => {
                    let tag = match matched {
                        MatchKind::Exact => "",
                        MatchKind::Fuzzy => " [fuzzy]",
                    };
                    log::info!(
                        "  {} {}{}{}",
                        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                        item.title,
                        year.if_supports_color(Stdout, |t| t.dimmed()),
                        tag.if_supports_color(Stdout, |t| t.dimmed()),
                    );
                }
                GapClass::Missing => {
                    log::info!(
                        "  {} {}{} {}",
                        "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                        item.title,
                        year.if_supports_color(Stdout, |t| t.dimmed()),
                        "MISSING".if_supports_color(Stdout, |t| t.red()),
                    );
                }
                GapClass::Ambiguous { candidates } => {
                    log::info!(
                        "  {} {}{} {}",
                        "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                        item.title,
                        year.if_supports_color(Stdout, |t| t.dimmed()),
                        "AMBIGUOUS".if_supports_color(Stdout, |t| t.yellow()),
                    );
                    for candidate in candidates {
                        log::info!(
                            "      {} {}",
                            "\u{2022}".if_supports_color(Stdout, |t| t.dimmed()),
                            candidate,
                        );
                    }
                }
            }
        }

        crate::log_blank();
        log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
        log::info!("  Reference entries: {:>6}", report.stats.reference_total);
        log::info!("  Present:           {:>6}", report.stats.present);
        log::info!("  Missing:           {:>6}", report.stats.missing);
        log::info!("  Ambiguous:         {:>6}", report.stats.ambiguous);
        if report.stats.unparsed > 0 {
            log::info!("  Unparsed lines:    {:>6}", report.stats.unparsed);
        }
        if record && report.stats.ambiguous > 0 {
            log::info!(
                "Ambiguous matches queued for review; see 'shelfgap review list'."
            );
        }
    }

    if report.stats.missing > 0 || report.stats.ambiguous > 0 {
        Ok(CommandStatus::Partial)
    } else {
        Ok(CommandStatus::Full)
    }
}
