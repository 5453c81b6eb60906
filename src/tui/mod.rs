//! Ratatui-based terminal UI.
//!
//! One screen, mirroring the web dashboard: a year selector, three KPI tiles,
//! the units-sold and price-per-m² comparison charts, the data table for the
//! selected year, and a key to download that table as CSV.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
};

use crate::app::pipeline::DashboardView;
use crate::data::Dataset;
use crate::domain::{DashboardConfig, Location};
use crate::error::AppError;
use crate::report::{MonthlyComparison, format_currency, format_gvv, format_units};

mod plotters_chart;

use plotters_chart::{
    CURRENT_COLOR, PRIOR_COLOR, PriceLine, PriceLineChart, UnitsBarChart, location_colors,
    padded_bounds, to_ratatui,
};

/// Start the TUI.
pub fn run(dataset: &Dataset, config: DashboardConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(dataset, config)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App<'a> {
    dataset: &'a Dataset,
    /// Selector options, newest first.
    years: Vec<i32>,
    selected: usize,
    export_dir: PathBuf,
    status: String,
    view: DashboardView<'a>,
}

impl<'a> App<'a> {
    fn new(dataset: &'a Dataset, config: DashboardConfig) -> Result<Self, AppError> {
        let mut years = dataset.years();
        years.reverse();
        if years.is_empty() {
            return Err(AppError::new(2, "Dataset has no years to select."));
        }

        // The selector only offers known years; an unknown configured year falls back to the newest.
        let (selected, status) = match years.iter().position(|&y| y == config.year) {
            Some(idx) => (idx, format!("Ano: {}", config.year)),
            None => (
                0,
                format!("Ano {} fora dos dados; exibindo {}.", config.year, years[0]),
            ),
        };

        let view = DashboardView::for_year(dataset, years[selected]);
        Ok(Self {
            dataset,
            years,
            selected,
            export_dir: config.export_dir,
            status,
            view,
        })
    }

    fn selected_year(&self) -> i32 {
        self.years[self.selected]
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left | KeyCode::Up => self.select(self.selected.saturating_sub(1)),
            KeyCode::Right | KeyCode::Down => {
                self.select((self.selected + 1).min(self.years.len() - 1))
            }
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
        false
    }

    /// Selection-change handler: recompute every output for the new year.
    fn select(&mut self, idx: usize) {
        if idx == self.selected {
            return;
        }
        self.selected = idx;
        self.view = DashboardView::for_year(self.dataset, self.selected_year());
        self.status = match &self.view.kpis {
            Ok(_) => format!("Ano: {}", self.view.year),
            Err(err) => format!("KPIs indisponíveis: {err}"),
        };
    }

    fn export(&mut self) {
        self.status = match self.view.export_to_dir(&self.export_dir) {
            Ok(path) => format!("Salvo {} (text/csv)", path.display()),
            Err(err) => format!("Falha ao exportar: {err}"),
        };
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(4),
                Constraint::Min(12),
                Constraint::Length(11),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_kpis(frame, chunks[1]);
        self.draw_charts(frame, chunks[2]);
        self.draw_table(frame, chunks[3]);
        self.draw_footer(frame, chunks[4]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut selector = vec![Span::styled("Ano: ", Style::default().fg(Color::Gray))];
        for (idx, year) in self.years.iter().enumerate() {
            let style = if idx == self.selected {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            selector.push(Span::styled(format!(" {year} "), style));
            selector.push(Span::raw(" "));
        }

        let lines = vec![
            Line::from(vec![
                Span::styled("Galvan Intelligence Dashboard", Style::default().fg(Color::Cyan)),
            ]),
            Line::from(format!(
                "Análise de performance do mercado imobiliário de Joinville - Ano: {}",
                self.view.year
            )),
            Line::from(selector),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_kpis(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(area);

        let values = match &self.view.kpis {
            Ok(k) => [
                format_units(k.last_units_sold),
                format_gvv(k.last_gvv),
                format_currency(k.last_price_b),
            ],
            Err(_) => ["-".to_string(), "-".to_string(), "-".to_string()],
        };
        let titles = [
            "Unidades Vendidas (Último Mês)".to_string(),
            "VGV (Último Mês)".to_string(),
            format!("Preço m² {} (Último Mês)", Location::Saguacu.display_name()),
        ];

        for ((title, value), rect) in titles.into_iter().zip(values).zip(cols.iter()) {
            let tile = Paragraph::new(Span::styled(
                value,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(tile, *rect);
        }
    }

    fn draw_charts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let cmp = match &self.view.comparison {
            Some(Ok(cmp)) => cmp,
            Some(Err(err)) => {
                let msg = format!("Comparativo indisponível: {err}");
                draw_placeholder(frame, area, "Comparativo", &msg);
                return;
            }
            None => {
                draw_placeholder(
                    frame,
                    area,
                    "Comparativo",
                    "Comparativo indisponível: apenas um ano de dados.",
                );
                return;
            }
        };

        self.draw_units_chart(frame, cols[0], cmp);
        self.draw_price_chart(frame, cols[1], cmp);
    }

    fn draw_units_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, cmp: &MonthlyComparison) {
        let title = format!(
            "Unidades Vendidas por Mês ({} vs. {})",
            cmp.prior_year, cmp.current_year
        );
        let inner = chart_frame(frame, area, &title);
        let (legend_rect, chart_rect) = split_legend(inner);

        let legend = Line::from(vec![
            legend_entry(&cmp.prior_year.to_string(), to_ratatui(PRIOR_COLOR)),
            legend_entry(&cmp.current_year.to_string(), to_ratatui(CURRENT_COLOR)),
        ]);
        frame.render_widget(Paragraph::new(legend), legend_rect);

        let y_max = f64::from(cmp.max_units_sold()) * 1.1;
        let widget = UnitsBarChart {
            months: &cmp.months,
            prior: &cmp.units_sold.prior,
            current: &cmp.units_sold.current,
            y_max,
        };
        frame.render_widget(widget, chart_rect);
    }

    fn draw_price_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, cmp: &MonthlyComparison) {
        let title = format!(
            "Preço Médio por m² ({} vs. {})",
            cmp.prior_year, cmp.current_year
        );
        let inner = chart_frame(frame, area, &title);
        let (legend_rect, chart_rect) = split_legend(inner);

        // Current-year lines first, then prior year; one line per location in each.
        let mut legend = Vec::with_capacity(2 * Location::ALL.len());
        let mut lines = Vec::with_capacity(2 * Location::ALL.len());
        for current in [true, false] {
            let year = if current { cmp.current_year } else { cmp.prior_year };
            for loc in Location::ALL {
                let series = cmp.price(loc);
                let (current_color, prior_color) = location_colors(loc);
                let (values, color) = if current {
                    (&series.current, current_color)
                } else {
                    (&series.prior, prior_color)
                };
                legend.push(legend_entry(&format!("{} {year}", loc.display_name()), to_ratatui(color)));
                lines.push(PriceLine { values, color });
            }
        }
        frame.render_widget(Paragraph::new(Line::from(legend)), legend_rect);

        let (lo, hi) = cmp.price_range().unwrap_or((0.0, 1.0));
        let widget = PriceLineChart {
            months: &cmp.months,
            lines,
            y_bounds: padded_bounds(lo, hi),
        };
        frame.render_widget(widget, chart_rect);
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(format!("Dados Consolidados de {}", self.view.year))
            .borders(Borders::ALL);

        if self.view.records.is_empty() {
            let msg = Paragraph::new("Sem registros para este ano.")
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(msg, area);
            return;
        }

        let header = Row::new([
            "Mês",
            "Ano",
            "Lançados",
            "Vendidas",
            "VGV (R$ M)",
            "m² Joinville",
            "m² Saguaçu",
        ])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        let rows = self.view.records.iter().map(|r| {
            Row::new([
                Cell::from(r.month.label()),
                Cell::from(r.year.to_string()),
                Cell::from(r.units_launched.to_string()),
                Cell::from(r.units_sold.to_string()),
                Cell::from(format!("{:.1}", r.gvv_millions)),
                Cell::from(format!("{:.2}", r.price_per_sqm_a)),
                Cell::from(format!("{:.2}", r.price_per_sqm_b)),
            ])
        });

        let widths = [
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(11),
            Constraint::Length(13),
            Constraint::Length(13),
        ];
        let table = Table::new(rows, widths).header(header).block(block);
        frame.render_widget(table, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ ano  e baixar CSV  q sair";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn chart_frame(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str) -> Rect {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);
    inner
}

fn split_legend(inner: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    (chunks[0], chunks[1])
}

fn legend_entry(label: &str, color: Color) -> Span<'static> {
    Span::styled(format!("■ {label}  "), Style::default().fg(color))
}

fn draw_placeholder(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, msg: &str) {
    let p = Paragraph::new(msg.to_string())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(p, area);
}
