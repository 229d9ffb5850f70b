//! Chart panels for the dashboard pages

use ratatui::layout::{Direction, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Map, MapResolution, Points};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs,
    Wrap,
};
use ratatui::Frame;
use tracing::debug;

use super::Page;
use crate::error::Result;
use crate::map::WorldMap;
use crate::report::Table;

/// The price axis of the scatter plot is clamped to this range
const PRICE_BOUNDS: [f64; 2] = [1.0, 1000.0];
const RATING_FALLBACK_BOUNDS: [f64; 2] = [80.0, 100.0];

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(Color::Blue))
}

/// Page selector across the top
pub fn render_tabs(frame: &mut Frame, area: Rect, selected: Page) {
    let titles: Vec<Line> = Page::ALL.iter().map(|p| Line::from(p.title())).collect();
    let selected_idx = Page::ALL.iter().position(|p| *p == selected).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(panel("Wine review analysis"))
        .select(selected_idx)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

pub fn render_help(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled(" ←/→ ", Style::default().fg(Color::Cyan)),
        Span::raw("switch page  "),
        Span::styled(" q ", Style::default().fg(Color::Cyan)),
        Span::raw("quit"),
    ]);
    frame.render_widget(Paragraph::new(help), area);
}

/// Rating against price, one point per review
pub struct ScatterPanel {
    points: Vec<(f64, f64)>,
    rating_bounds: [f64; 2],
}

impl ScatterPanel {
    /// Rows whose rating or price is not a number are left out of the plot
    pub fn from_table(table: &Table) -> Result<Self> {
        let ratings = table.column("rating")?;
        let prices = table.column("price")?;
        let points: Vec<(f64, f64)> = ratings
            .into_iter()
            .zip(prices)
            .filter_map(|(rating, price)| Some((rating.as_f64()?, price.as_f64()?)))
            .collect();
        if points.len() < table.len() {
            debug!(
                skipped = table.len() - points.len(),
                "reviews without numeric rating or price left out of scatter plot"
            );
        }

        let rating_bounds = points
            .iter()
            .map(|(rating, _)| *rating)
            .fold(None, |acc: Option<[f64; 2]>, r| match acc {
                None => Some([r, r]),
                Some([lo, hi]) => Some([lo.min(r), hi.max(r)]),
            })
            .filter(|&[lo, hi]| lo < hi)
            .unwrap_or(RATING_FALLBACK_BOUNDS);

        Ok(Self {
            points,
            rating_bounds,
        })
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let dataset = Dataset::default()
            .name("reviews")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Magenta))
            .data(&self.points);

        let [lo, hi] = self.rating_bounds;
        let chart = Chart::new(vec![dataset])
            .block(panel("Rating vs. price"))
            .x_axis(
                Axis::default()
                    .title("Rating")
                    .style(Style::default().fg(Color::Gray))
                    .bounds(self.rating_bounds)
                    .labels(vec![
                        Span::raw(format!("{:.0}", lo)),
                        Span::raw(format!("{:.0}", (lo + hi) / 2.0)),
                        Span::raw(format!("{:.0}", hi)),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title("Price in USD")
                    .style(Style::default().fg(Color::Gray))
                    .bounds(PRICE_BOUNDS)
                    .labels(vec![Span::raw("1"), Span::raw("500"), Span::raw("1000")]),
            );
        frame.render_widget(chart, area);
    }
}

/// Horizontal bar chart of one ranking
pub struct BarPanel {
    title: &'static str,
    bars: Vec<(String, f64)>,
}

impl BarPanel {
    pub fn from_table(
        title: &'static str,
        table: &Table,
        label_column: &str,
        value_column: &str,
    ) -> Result<Self> {
        let labels = table.column(label_column)?;
        let values = table.f64_column(value_column)?;
        let bars = labels
            .into_iter()
            .map(|label| label.to_string())
            .zip(values)
            .collect();
        Ok(Self { title, bars })
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let bars: Vec<Bar> = self
            .bars
            .iter()
            .map(|(label, value)| {
                Bar::default()
                    .label(Line::from(label.as_str()))
                    .value(value.round().max(0.0) as u64)
                    .text_value(format!("{:.0}", value))
            })
            .collect();

        let chart = BarChart::default()
            .block(panel(self.title))
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, area);
    }
}

/// Name and location of the best rated wine
pub struct BestWinePanel {
    fields: Vec<(String, String)>,
}

impl BestWinePanel {
    pub fn from_table(table: &Table) -> Result<Self> {
        let mut fields = Vec::new();
        for (label, column) in [
            ("Wine", "wine"),
            ("Winery", "winery"),
            ("Region", "region1"),
            ("Subregion", "region2"),
            ("Province", "province"),
            ("Country", "country"),
        ] {
            if let Some(value) = table.get(0, column)? {
                fields.push((label.to_string(), value.to_string()));
            }
        }
        Ok(Self { fields })
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = if self.fields.is_empty() {
            vec![Line::from(Span::styled(
                "No reviews in this database",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.fields
                .iter()
                .map(|(label, value)| {
                    Line::from(vec![
                        Span::styled(
                            format!("{:>10}: ", label),
                            Style::default().fg(Color::Gray),
                        ),
                        Span::styled(
                            value.as_str(),
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ])
                })
                .collect()
        };

        let paragraph = Paragraph::new(lines)
            .block(panel("The best wine"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

/// World map with one labelled point per located country
pub struct MapPanel {
    markers: Vec<(f64, f64, String)>,
}

impl MapPanel {
    pub fn from_map(map: &WorldMap) -> Self {
        let markers = map
            .markers
            .iter()
            .map(|m| {
                (
                    m.location.longitude,
                    m.location.latitude,
                    format!("{} ${}", m.label, m.price),
                )
            })
            .collect();
        Self { markers }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let canvas = Canvas::default()
            .block(panel("Average price per country"))
            .marker(Marker::Braille)
            .x_bounds([-180.0, 180.0])
            .y_bounds([-90.0, 90.0])
            .paint(|ctx| {
                ctx.draw(&Map {
                    resolution: MapResolution::High,
                    color: Color::DarkGray,
                });
                ctx.layer();
                for (lon, lat, label) in &self.markers {
                    ctx.draw(&Points {
                        coords: &[(*lon, *lat)],
                        color: Color::Red,
                    });
                    ctx.print(
                        *lon,
                        *lat,
                        Line::styled(label.clone(), Style::default().fg(Color::Yellow)),
                    );
                }
            });
        frame.render_widget(canvas, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;
    use crate::map::CircleMarker;
    use crate::report::Value;

    #[test]
    fn test_map_labels_use_marker_price() {
        let map = WorldMap {
            tiles: crate::map::Tiles::OpenStreetMap,
            markers: vec![CircleMarker {
                location: Coordinates::new(46.94809, 7.44744),
                label: "Côte & Co".to_string(),
                price: 41,
                radius: 20.0,
                popup: "Country: Côte &amp; Co<br>Average price: 41 USD<br>".to_string(),
                fill: true,
                fill_opacity: 0.0,
            }],
        };
        let panel = MapPanel::from_map(&map);
        assert_eq!(panel.markers, vec![(7.44744, 46.94809, "Côte & Co $41".to_string())]);
    }

    #[test]
    fn test_scatter_skips_rows_without_numbers() {
        let table = Table::from_rows(
            ["rating", "price"],
            vec![
                vec![Value::Real(90.0), Value::Real(50.0)],
                vec![Value::Null, Value::Real(50.0)],
                vec![Value::Real(85.0), Value::from("")],
                vec![Value::Real(88.0), Value::from("24")],
            ],
        );
        let panel = ScatterPanel::from_table(&table).unwrap();
        assert_eq!(panel.points, vec![(90.0, 50.0), (88.0, 24.0)]);
        assert_eq!(panel.rating_bounds, [88.0, 90.0]);
    }

    #[test]
    fn test_scatter_bounds_follow_ratings() {
        let table = Table::from_rows(
            ["rating", "price"],
            vec![
                vec![Value::Integer(84), Value::Real(15.0)],
                vec![Value::Integer(96), Value::Real(120.0)],
            ],
        );
        let panel = ScatterPanel::from_table(&table).unwrap();
        assert_eq!(panel.rating_bounds, [84.0, 96.0]);
        assert_eq!(panel.points.len(), 2);
    }

    #[test]
    fn test_scatter_single_rating_uses_fallback() {
        let table = Table::from_rows(
            ["rating", "price"],
            vec![vec![Value::Integer(90), Value::Real(50.0)]],
        );
        let panel = ScatterPanel::from_table(&table).unwrap();
        assert_eq!(panel.rating_bounds, RATING_FALLBACK_BOUNDS);
    }

    #[test]
    fn test_bar_panel_reads_named_columns() {
        let table = Table::from_rows(
            ["number", "grape"],
            vec![
                vec![Value::Integer(12), Value::from("Riesling")],
                vec![Value::Integer(3), Value::from("Merlot")],
            ],
        );
        let panel = BarPanel::from_table("Wines per grape", &table, "grape", "number").unwrap();
        assert_eq!(
            panel.bars,
            vec![("Riesling".to_string(), 12.0), ("Merlot".to_string(), 3.0)]
        );
        assert!(BarPanel::from_table("x", &table, "country", "number").is_err());
    }

    #[test]
    fn test_best_wine_panel_empty_table() {
        let table = Table::new(["wine", "region1", "region2", "province", "country", "winery"]);
        let panel = BestWinePanel::from_table(&table).unwrap();
        assert!(panel.fields.is_empty());
    }
}
