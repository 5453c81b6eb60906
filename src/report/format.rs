//! Formatted terminal output: KPI values, tables and the comparison summary.
//!
//! We keep formatting code in one place so:
//! - the dataset/metrics code stays clean and testable
//! - the CLI and the TUI show identical numbers

use crate::app::pipeline::DashboardView;
use crate::domain::{Kpis, Location, SalesRecord};
use crate::report::series::MonthlyComparison;

/// Units sold, as a plain integer.
pub fn format_units(units: u32) -> String {
    units.to_string()
}

/// VGV in millions, e.g. `R$ 80.6 Milhões`.
pub fn format_gvv(gvv_millions: f64) -> String {
    format!("R$ {gvv_millions} Milhões")
}

/// Currency with two decimals and comma thousands, e.g. `R$ 10,800.00`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("R$ {sign}{}.{frac_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// The three KPI tiles as labelled lines.
pub fn format_kpis(kpis: &Kpis) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Unidades Vendidas (Último Mês): {}\n",
        format_units(kpis.last_units_sold)
    ));
    out.push_str(&format!("VGV (Último Mês): {}\n", format_gvv(kpis.last_gvv)));
    out.push_str(&format!(
        "Preço m² {} (Último Mês): {}\n",
        Location::Saguacu.display_name(),
        format_currency(kpis.last_price_b)
    ));
    out
}

/// Format a year's records as a fixed-width table.
pub fn format_table(rows: &[&SalesRecord]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<4} {:>5} {:>9} {:>9} {:>10} {:>10} {:>10}",
            "Mês", "Ano", "Lançados", "Vendidas", "VGV (M)", "Joinville", "Saguaçu"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!(
        "{:-<4} {:-<5} {:-<9} {:-<9} {:-<10} {:-<10} {:-<10}\n",
        "", "", "", "", "", "", ""
    ));

    for r in rows {
        out.push_str(
            format!(
                "{:<4} {:>5} {:>9} {:>9} {:>10.1} {:>10.2} {:>10.2}",
                r.month.label(),
                r.year,
                r.units_launched,
                r.units_sold,
                r.gvv_millions,
                r.price_per_sqm_a,
                r.price_per_sqm_b,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Month-by-month comparison of units sold and price per m².
pub fn format_comparison(cmp: &MonthlyComparison) -> String {
    let years = [cmp.prior_year, cmp.current_year];
    let mut out = String::new();
    out.push_str(&format!("Comparativo {} vs. {}:\n", years[0], years[1]));

    out.push_str(&format!("{:<4}", "Mês"));
    for year in years {
        out.push_str(&format!(" {:>14}", format!("Vendidas {year}")));
    }
    for loc in Location::ALL {
        for year in years {
            out.push_str(&format!(" {:>14}", format!("{} {year}", loc.display_name())));
        }
    }
    out.push('\n');

    for (i, month) in cmp.months.iter().enumerate() {
        out.push_str(&format!(
            "{:<4} {:>14} {:>14}",
            month.label(),
            cmp.units_sold.prior[i],
            cmp.units_sold.current[i],
        ));
        for loc in Location::ALL {
            let series = cmp.price(loc);
            out.push_str(&format!(" {:>14.2} {:>14.2}", series.prior[i], series.current[i]));
        }
        out.push('\n');
    }

    out
}

/// Full text rendering of a dashboard view (used by `galvan summary`).
///
/// A failing section is replaced by its error message; the other sections are
/// still rendered.
pub fn format_dashboard(view: &DashboardView<'_>) -> String {
    let mut out = String::new();

    out.push_str("=== Galvan Intelligence Dashboard ===\n");
    out.push_str(&format!(
        "Análise de performance do mercado imobiliário de Joinville - Ano: {}\n\n",
        view.year
    ));

    match &view.kpis {
        Ok(kpis) => out.push_str(&format_kpis(kpis)),
        Err(err) => out.push_str(&format!("KPIs indisponíveis: {err}\n")),
    }
    out.push('\n');

    match &view.comparison {
        Some(Ok(cmp)) => out.push_str(&format_comparison(cmp)),
        Some(Err(err)) => out.push_str(&format!("Comparativo indisponível: {err}\n")),
        None => out.push_str("Comparativo indisponível: apenas um ano de dados.\n"),
    }
    out.push('\n');

    out.push_str(&format!("Dados Consolidados de {}:\n", view.year));
    out.push_str(&format_table(&view.records));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::domain::Month;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(10800.0), "R$ 10,800.00");
        assert_eq!(format_currency(8950.0), "R$ 8,950.00");
        assert_eq!(format_currency(950.5), "R$ 950.50");
        assert_eq!(format_currency(1234567.891), "R$ 1,234,567.89");
        assert_eq!(format_currency(0.0), "R$ 0.00");
    }

    #[test]
    fn gvv_uses_shortest_decimal() {
        assert_eq!(format_gvv(80.6), "R$ 80.6 Milhões");
        assert_eq!(format_gvv(53.0), "R$ 53 Milhões");
    }

    #[test]
    fn kpi_lines() {
        let kpis = Kpis {
            year: 2025,
            month: Month::Jul,
            last_units_sold: 130,
            last_gvv: 80.6,
            last_price_b: 10800.0,
        };
        let text = format_kpis(&kpis);
        assert!(text.contains("Unidades Vendidas (Último Mês): 130"));
        assert!(text.contains("VGV (Último Mês): R$ 80.6 Milhões"));
        assert!(text.contains("Preço m² Saguaçu (Último Mês): R$ 10,800.00"));
    }

    #[test]
    fn table_has_header_rule_and_rows() {
        let ds = Dataset::builtin();
        let text = format_table(&ds.filter_by_year(2024));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2 + 7);
        assert!(lines[0].starts_with("Mês"));
        assert!(lines[2].starts_with("Jan"));
        assert!(lines[8].starts_with("Jul"));
        assert!(lines[8].ends_with("8950.00"));
    }

    #[test]
    fn comparison_lists_every_month() {
        let ds = Dataset::builtin();
        let cmp = MonthlyComparison::latest_pair(&ds).unwrap().unwrap();
        let text = format_comparison(&cmp);
        assert!(text.starts_with("Comparativo 2024 vs. 2025:"));
        assert_eq!(text.lines().count(), 2 + 7);

        let header = text.lines().nth(1).unwrap();
        assert!(header.contains("Joinville 2024"));
        assert!(header.contains("Saguaçu 2025"));
        // Columns follow the header: units, then Joinville, then Saguaçu, prior before current.
        let jul: Vec<&str> = text.lines().last().unwrap().split_whitespace().collect();
        assert_eq!(jul, ["Jul", "100", "130", "7400.00", "8750.00", "8950.00", "10800.00"]);
    }
}
