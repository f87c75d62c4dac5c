//! Plain-text rendering of a [`DashboardView`] for the terminal.

use crate::analyser::differences::DifferenceRecord;
use crate::analyser::heatmap::HeatmapGrid;
use crate::dashboard::{DashboardView, DonutChart, RankedTable, StateMetric};
use crate::format::{format_population, group_thousands};

const BAR_WIDTH: usize = 20;

/// Renders the metric tiles, migration shares and ranked table.
pub fn render_dashboard(view: &DashboardView, table_limit: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "US Population Dashboard | {} | theme: {}\n\n",
        view.year, view.theme
    ));

    out.push_str("Gains/Losses\n");
    render_metric(&mut out, &view.gains);
    render_metric(&mut out, &view.losses);
    out.push('\n');

    out.push_str("States Migration\n");
    render_donut(&mut out, &view.inbound_donut);
    render_donut(&mut out, &view.outbound_donut);
    out.push('\n');

    out.push_str("Top States\n");
    render_table(&mut out, &view.table, table_limit);
    out
}

fn render_metric(out: &mut String, metric: &StateMetric) {
    out.push_str(&format!(
        "  {:<20} {:>9} {:>9}\n",
        metric.label, metric.value, metric.delta
    ));
}

fn render_donut(out: &mut String, donut: &DonutChart) {
    let filled = usize::from(donut.percent) * BAR_WIDTH / 100;
    out.push_str(&format!(
        "  {:<20} [{}{}] {:>3} %\n",
        donut.label,
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        donut.percent
    ));
}

fn render_table(out: &mut String, table: &RankedTable, limit: Option<usize>) {
    if table.rows.is_empty() {
        out.push_str("  -\n");
        return;
    }
    let limit = limit.unwrap_or(table.rows.len());
    for row in table.rows.iter().take(limit) {
        let filled = if table.max_population == 0 {
            0
        } else {
            (u128::from(row.population) * BAR_WIDTH as u128 / u128::from(table.max_population))
                as usize
        };
        out.push_str(&format!(
            "  {:<20} {:>12} {}\n",
            row.state,
            group_thousands(i64::try_from(row.population).unwrap_or(i64::MAX)),
            "|".repeat(filled)
        ));
    }
}

/// Renders a difference table, largest gain first.
pub fn render_differences(differences: &[DifferenceRecord], limit: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<20} {:>12} {:>10}\n",
        "State", "Population", "Change"
    ));
    for d in differences.iter().take(limit.unwrap_or(differences.len())) {
        out.push_str(&format!(
            "{:<20} {:>12} {:>10}\n",
            d.state,
            group_thousands(i64::try_from(d.population).unwrap_or(i64::MAX)),
            format!("{:+}", d.population_delta)
        ));
    }
    out
}

/// Renders the heatmap grid transposed: one line per state, one column per year.
pub fn render_heatmap(grid: &HeatmapGrid) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<20}", "State"));
    for year in &grid.years {
        out.push_str(&format!(" {year:>9}"));
    }
    out.push('\n');

    for state in &grid.states {
        out.push_str(&format!("{state:<20}"));
        for &year in &grid.years {
            let cell = grid
                .get(year, state)
                .map_or_else(|| "-".to_owned(), format_population);
            out.push_str(&format!(" {cell:>9}"));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{DashboardFilters, derive_view};
    use crate::dataset::PopulationDataset;
    use crate::dataset::tests::record;
    use crate::theme::ColorTheme;

    fn dataset() -> PopulationDataset {
        PopulationDataset::from_records(vec![
            record("Texas", "48", 2018, 28_701_845),
            record("Texas", "48", 2019, 28_995_881),
            record("Maine", "23", 2018, 1_338_404),
            record("Maine", "23", 2019, 1_344_212),
        ])
        .unwrap()
    }

    fn view(year: i32) -> DashboardView {
        derive_view(
            &dataset(),
            &DashboardFilters {
                selected_year: year,
                selected_theme: ColorTheme::Reds,
            },
        )
    }

    #[test]
    fn test_dashboard_sections() {
        let text = render_dashboard(&view(2019), None);
        assert!(text.starts_with("US Population Dashboard | 2019 | theme: reds"));
        assert!(text.contains("Gains/Losses"));
        assert!(text.contains("Texas"));
        assert!(text.contains("294 K"));
        assert!(text.contains(" 50 %"));
        assert!(text.contains("28,995,881 ||||||||||||||||||||"));
    }

    #[test]
    fn test_table_limit() {
        let text = render_dashboard(&view(2019), Some(1));
        assert!(text.contains("28,995,881"));
        assert!(!text.contains("1,344,212"));
    }

    #[test]
    fn test_first_year_placeholders() {
        let text = render_dashboard(&view(2018), None);
        assert!(text.contains("\n  -   "));
        assert!(text.contains("  0 %"));
    }

    #[test]
    fn test_render_differences_signs() {
        let diffs = view(2019).differences.unwrap();
        let text = render_differences(&diffs, None);
        assert!(text.contains("+294036"));
        assert!(text.contains("+5808"));
    }

    #[test]
    fn test_render_heatmap() {
        let text = render_heatmap(&view(2019).heatmap);
        let mut lines = text.lines();
        assert!(lines.next().unwrap().contains("2018      2019"));
        let maine = lines.next().unwrap();
        assert!(maine.starts_with("Maine"));
        assert!(maine.contains("1.3 M"));
    }
}
