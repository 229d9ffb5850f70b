//! Terminal dashboard using ratatui
//!
//! One page per section of the report:
//! - Rating vs. price scatter plot
//! - Average price per winery
//! - Average price per country and province
//! - Number of wines per country and grape
//! - The best wine and where it comes from
//! - World map of average prices per country

mod components;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

use components::{render_help, render_tabs, BarPanel, BestWinePanel, MapPanel, ScatterPanel};

use crate::dashboard::DashboardData;

/// Dashboard pages in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    PriceRating,
    WineryPrice,
    RegionPrice,
    WineCounts,
    BestWine,
    Map,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::PriceRating,
        Page::WineryPrice,
        Page::RegionPrice,
        Page::WineCounts,
        Page::BestWine,
        Page::Map,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::PriceRating => "Rating & price",
            Page::WineryPrice => "Wineries",
            Page::RegionPrice => "Countries & provinces",
            Page::WineCounts => "Wines & grapes",
            Page::BestWine => "Best wine",
            Page::Map => "Map",
        }
    }

    fn index(&self) -> usize {
        Page::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn next(&self) -> Page {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    pub fn prev(&self) -> Page {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Chart-ready view of the dashboard data plus the selected page
pub struct DashboardView {
    page: Page,
    scatter: ScatterPanel,
    winery_price: BarPanel,
    country_price: BarPanel,
    province_price: BarPanel,
    wines_per_country: BarPanel,
    wines_per_grape: BarPanel,
    best_wine: BestWinePanel,
    map: MapPanel,
}

impl DashboardView {
    pub fn new(data: &DashboardData) -> crate::error::Result<Self> {
        Ok(Self {
            page: Page::PriceRating,
            scatter: ScatterPanel::from_table(&data.price_rating)?,
            winery_price: BarPanel::from_table(
                "Average price per winery (USD)",
                &data.winery_price,
                "winery",
                "avg_price",
            )?,
            country_price: BarPanel::from_table(
                "Average price per country (USD)",
                &data.country_price,
                "country",
                "price",
            )?,
            province_price: BarPanel::from_table(
                "Average price per province (USD)",
                &data.province_price,
                "province",
                "price",
            )?,
            wines_per_country: BarPanel::from_table(
                "Wines per country",
                &data.wines_per_country,
                "country",
                "number",
            )?,
            wines_per_grape: BarPanel::from_table(
                "Wines per grape",
                &data.wines_per_grape,
                "grape",
                "number",
            )?,
            best_wine: BestWinePanel::from_table(&data.best_wine)?,
            map: MapPanel::from_map(&data.map),
        })
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn select(&mut self, page: Page) {
        self.page = page;
    }

    /// Apply a key press; returns true when the dashboard should close
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => self.page = self.page.next(),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => self.page = self.page.prev(),
            KeyCode::Char(c) => {
                if let Some(page) = c
                    .to_digit(10)
                    .and_then(|d| (d as usize).checked_sub(1))
                    .and_then(|idx| Page::ALL.get(idx))
                {
                    self.page = *page;
                }
            }
            _ => {}
        }
        false
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(5),    // Page body
                Constraint::Length(1), // Help line
            ])
            .split(frame.area());

        render_tabs(frame, chunks[0], self.page);
        render_help(frame, chunks[2]);

        let body = chunks[1];
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(body);

        match self.page {
            Page::PriceRating => self.scatter.render(frame, body),
            Page::WineryPrice => self.winery_price.render(frame, body),
            Page::RegionPrice => {
                self.country_price.render(frame, halves[0]);
                self.province_price.render(frame, halves[1]);
            }
            Page::WineCounts => {
                self.wines_per_country.render(frame, halves[0]);
                self.wines_per_grape.render(frame, halves[1]);
            }
            Page::BestWine => self.best_wine.render(frame, body),
            Page::Map => self.map.render(frame, body),
        }
    }
}

/// Full-screen terminal application around a [`DashboardView`]
pub struct UiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    view: DashboardView,
}

impl UiApp {
    /// Create the application and enter the alternate screen
    pub fn new(view: DashboardView) -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, view })
    }

    /// Draw and handle keys until the user quits, then restore the terminal
    pub fn run(mut self) -> Result<()> {
        loop {
            let view = &self.view;
            self.terminal.draw(|frame| view.render(frame))?;

            if event::poll(Duration::from_millis(250))? {
                if let CrosstermEvent::Key(KeyEvent { code, kind, .. }) = event::read()? {
                    if kind == KeyEventKind::Press && self.view.handle_key(code) {
                        break;
                    }
                }
            }
        }

        self.restore()
    }

    /// Restore terminal without waiting
    pub fn restore(mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for UiApp {
    fn drop(&mut self) {
        // Best effort cleanup
        terminal::disable_raw_mode().ok();
        self.terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .ok();
        self.terminal.show_cursor().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;
    use crate::map::{CircleMarker, Tiles, WorldMap};
    use crate::report::{Table, Value};
    use ratatui::backend::TestBackend;

    fn data() -> DashboardData {
        let ranking = |label: &str, metric: &str, rows: &[(&str, f64)]| {
            Table::from_rows(
                [metric, label],
                rows.iter()
                    .map(|(name, v)| vec![Value::Real(*v), Value::from(*name)]),
            )
        };

        DashboardData {
            price_rating: Table::from_rows(
                ["rating", "price"],
                vec![
                    vec![Value::Integer(90), Value::Real(50.0)],
                    vec![Value::Integer(85), Value::Real(18.0)],
                ],
            ),
            winery_price: ranking("winery", "avg_price", &[("Trefethen", 100.0), ("Hugel", 35.0)]),
            country_price: ranking("country", "price", &[("England", 51.6), ("Germany", 42.2)]),
            province_price: ranking("province", "price", &[("Colares", 85.0)]),
            wines_per_country: ranking("country", "number", &[("US", 54.0)]),
            wines_per_grape: ranking("grape", "number", &[("Pinot Noir", 13.0)]),
            best_wine: Table::from_rows(
                ["wine", "region1", "region2", "province", "country", "winery"],
                vec![vec![
                    Value::from("Reserve Trefethen Cabernet Sauvignon"),
                    Value::from("Oak Knoll District"),
                    Value::from("Napa"),
                    Value::from("California"),
                    Value::from("US"),
                    Value::from("Trefethen"),
                ]],
            ),
            map: WorldMap {
                tiles: Tiles::CartoDbPositron,
                markers: vec![CircleMarker {
                    location: Coordinates::new(51.509865, -0.118092),
                    label: "England".to_string(),
                    price: 51,
                    radius: 20.0,
                    popup: "Country: England<br>Average price: 51 USD<br>".to_string(),
                    fill: true,
                    fill_opacity: 0.0,
                }],
            },
        }
    }

    fn screen(view: &DashboardView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| view.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_page_cycle() {
        assert_eq!(Page::Map.next(), Page::PriceRating);
        assert_eq!(Page::PriceRating.prev(), Page::Map);
        let mut page = Page::PriceRating;
        for _ in 0..Page::ALL.len() {
            page = page.next();
        }
        assert_eq!(page, Page::PriceRating);
    }

    #[test]
    fn test_handle_key() {
        let mut view = DashboardView::new(&data()).unwrap();
        assert!(!view.handle_key(KeyCode::Right));
        assert_eq!(view.page(), Page::WineryPrice);
        assert!(!view.handle_key(KeyCode::Left));
        assert!(!view.handle_key(KeyCode::Left));
        assert_eq!(view.page(), Page::Map);
        assert!(!view.handle_key(KeyCode::Char('5')));
        assert_eq!(view.page(), Page::BestWine);
        assert!(!view.handle_key(KeyCode::Char('9')));
        assert_eq!(view.page(), Page::BestWine);
        assert!(view.handle_key(KeyCode::Char('q')));
        assert!(view.handle_key(KeyCode::Esc));
    }

    #[test]
    fn test_every_page_renders() {
        let mut view = DashboardView::new(&data()).unwrap();
        for page in Page::ALL {
            view.select(page);
            let text = screen(&view);
            assert!(text.contains("Wine review analysis"), "{}", page);
        }
    }

    #[test]
    fn test_page_content() {
        let mut view = DashboardView::new(&data()).unwrap();

        view.select(Page::WineryPrice);
        assert!(screen(&view).contains("Trefethen"));

        view.select(Page::RegionPrice);
        let text = screen(&view);
        assert!(text.contains("Average price per country"));
        assert!(text.contains("Average price per province"));

        view.select(Page::BestWine);
        let text = screen(&view);
        assert!(text.contains("Reserve Trefethen Cabernet Sauvignon"));
        assert!(text.contains("Oak Knoll District"));

        view.select(Page::Map);
        assert!(screen(&view).contains("England $51"));
    }

    #[test]
    fn test_view_requires_named_columns() {
        let mut broken = data();
        broken.wines_per_grape = Table::from_rows(["count", "grape"], Vec::new());
        assert!(DashboardView::new(&broken).is_err());
    }
}
