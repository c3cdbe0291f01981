//! Markdown report renderer.
//!
//! Produces the text-mode body of the report tools. Section order is fixed:
//! downstream consumers pass the document through verbatim.

use std::fmt::Write;

use crate::domain::analysis::{Category, DssReport, IndicatorAhp, IndicatorEntry};
use crate::domain::kpi::{KpiReport, ReportPeriod};

const NOT_AVAILABLE: &str = "N/D";

/// Renders KPI and DSS reports as markdown.
#[derive(Debug, Clone, Default)]
pub struct MarkdownReportRenderer;

impl MarkdownReportRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Title, period line, KPI table, score, excellence and improvement
    /// lists, numbered recommendations.
    pub fn render_kpi_report(&self, title: &str, report: &KpiReport, decimals: u32) -> String {
        let mut md = String::new();
        let _ = writeln!(md, "# {}\n", title);
        md.push_str(&self.period_line(&report.period, report.facility.as_deref()));

        md.push_str("| Parametro | Valore attuale | Target | Stato | Trend |\n");
        md.push_str("|---|---|---|---|---|\n");
        for row in &report.kpis {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} | {} |",
                row.label,
                row.display,
                row.target,
                row.status.marker(),
                row.trend.arrow()
            );
        }

        md.push_str("\n## Punteggio complessivo\n\n");
        let _ = writeln!(
            md,
            "**{:.*} / 100** {} {}\n",
            decimals as usize,
            report.score_overall,
            report.score_band.marker(),
            report.score_band
        );

        md.push_str("## Aree di eccellenza\n\n");
        push_list(&mut md, &report.areas_of_excellence);

        md.push_str("## Aree di miglioramento\n\n");
        push_list(&mut md, &report.areas_of_improvement);

        md.push_str("## Raccomandazioni\n\n");
        for (i, rec) in report.recommendations.iter().enumerate() {
            let _ = writeln!(
                md,
                "{}. **{}** (impatto stimato: {}). {}",
                i + 1,
                rec.azione,
                rec.impatto_stimato,
                rec.nota
            );
        }
        md
    }

    /// Weights and CR, category scores, ranking, line items and notes.
    pub fn render_dss_report(&self, report: &DssReport, decimals: u32) -> String {
        let d = decimals as usize;
        let mut md = String::new();
        md.push_str("# Report DSS (AHP)\n\n");
        md.push_str(&self.period_line(&report.period, report.facility.as_deref()));

        md.push_str("## Pesi di categoria\n\n");
        md.push_str("| Categoria | Peso |\n|---|---:|\n");
        for category in Category::ALL {
            let _ = writeln!(
                md,
                "| {} | {:.*} |",
                category.label(),
                d,
                report.ahp.category.weights.get(category)
            );
        }
        let _ = writeln!(md, "\nCR matrice categorie: {:.3}\n", report.ahp.category.cr);

        md.push_str("## Pesi interni\n\n");
        let sections = [
            (Category::Environmental, &report.ahp.environment, &report.indicators.environment),
            (Category::Social, &report.ahp.social, &report.indicators.social),
            (Category::Financial, &report.ahp.financial, &report.indicators.financial),
        ];
        for (category, ahp, entries) in sections {
            push_intra_weights(&mut md, category, ahp, entries, d);
        }

        md.push_str("## Score per categoria\n\n");
        md.push_str("| Categoria | Score |\n|---|---:|\n");
        for category in Category::ALL {
            let _ = writeln!(md, "| {} | {:.*} |", category.label(), d, report.scores.get(category));
        }
        let _ = writeln!(
            md,
            "\n**Score finale:** {:.*} ({:.1}%)\n",
            d,
            report.scores.overall,
            report.scores.overall * 100.0
        );

        md.push_str("## Ranking\n\n");
        for (i, entry) in report.ranking.iter().enumerate() {
            let _ = writeln!(md, "{}. {} ({:.*})", i + 1, entry.category.label(), d, entry.score);
        }

        md.push_str("\n## Dettaglio indicatori\n\n");
        md.push_str("| Indicatore | Categoria | Peso finale | Valore norm. | Contributo | Gap |\n");
        md.push_str("|---|---|---:|---:|---:|---:|\n");
        for item in &report.line_items {
            let _ = writeln!(
                md,
                "| {} | {} | {:.*} | {:.*} | {:.*} | {:.*} |",
                item.label,
                item.category.label(),
                d,
                item.final_weight,
                d,
                item.norm_value,
                d,
                item.contribution,
                d,
                item.gap
            );
        }

        if !report.notes.is_empty() {
            md.push_str("\n## Note\n\n");
            push_list(&mut md, &report.notes);
        }
        md
    }

    fn period_line(&self, period: &ReportPeriod, facility: Option<&str>) -> String {
        let facility = facility.unwrap_or(NOT_AVAILABLE);
        format!(
            "**Periodo:** {} – {} • **Stabilimento:** {}\n\n",
            period.start.as_deref().unwrap_or(NOT_AVAILABLE),
            period.end.as_deref().unwrap_or(NOT_AVAILABLE),
            facility
        )
    }
}

fn push_list(md: &mut String, items: &[String]) {
    if items.is_empty() {
        md.push_str("- Nessuna\n");
    }
    for item in items {
        let _ = writeln!(md, "- {}", item);
    }
    md.push('\n');
}

fn push_intra_weights(
    md: &mut String,
    category: Category,
    ahp: &IndicatorAhp,
    entries: &[IndicatorEntry],
    decimals: usize,
) {
    let _ = writeln!(md, "### {} (CR {:.3})\n", category.label(), ahp.cr);
    if ahp.indicators.is_empty() {
        md.push_str("_Nessun indicatore_\n\n");
        return;
    }
    md.push_str("| Indicatore | Peso | Stato |\n|---|---:|---|\n");
    for (key, weight) in &ahp.indicators {
        let entry = entries.iter().find(|e| &e.key == key);
        let label = entry.map(|e| e.label.as_str()).unwrap_or(key);
        let marker = entry.map(|e| e.status.marker()).unwrap_or("⚪");
        let _ = writeln!(md, "| {} | {:.*} | {} |", label, decimals, weight, marker);
    }
    md.push('\n');
}
