use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Line,
    widgets::{
        Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, List, ListItem, ListState,
        Paragraph, Wrap,
    },
};

use crate::{
    report::{LabeledValue, Report},
    selection::Choice,
    series::{BMR_AXIS, HEIGHT_AXIS, SeriesPoint, WEIGHT_AXIS},
    state::{AppState, Field},
    weather::TemperatureSeries,
};

const MAX_X_LABELS: usize = 6;

pub fn draw(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(50),
            Constraint::Percentage(30),
        ].as_ref())
        .split(f.area());

    draw_sidebar(f, chunks[0], state);

    match &state.report {
        Some(report) => {
            draw_center(f, chunks[1], report);
            draw_issues(f, chunks[2], report);
        }
        None => {
            let hint = "Choose the user details and press Enter to submit";
            message(f, chunks[1], "Anthropometric Data", hint);
            message(f, chunks[2], "User Insights", hint);
        }
    }
}

fn block(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title)
}

fn message(f: &mut Frame, area: Rect, title: &str, text: &str) {
    let p = Paragraph::new(text.to_string())
        .block(block(title))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

// Lewy panel: formularz + pomoc
fn draw_sidebar(f: &mut Frame, area: Rect, state: &AppState) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(Field::ALL.len() as u16 + 2), Constraint::Min(3)].as_ref())
        .split(area);

    let items: Vec<ListItem> = Field::ALL
        .iter()
        .map(|field| match field {
            Field::Submit => ListItem::new("[ Submit ]").style(Style::default().add_modifier(Modifier::BOLD)),
            _ => ListItem::new(format!("{}: {}", field.title(), state.field_value(*field))),
        })
        .collect();
    let mut list_state = ListState::default();
    list_state.select(Some(state.focused));
    let list = List::new(items)
        .block(block("User Details"))
        .highlight_symbol(">> ")
        .highlight_style(Style::default().fg(Color::Red));
    f.render_stateful_widget(list, parts[0], &mut list_state);

    let help = format!("Mode: {}\n\n{}", state.mode, AppState::HELP_TEXT);
    message(f, parts[1], "Help", &help);
}

fn draw_center(f: &mut Frame, area: Rect, report: &Report) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(24),
            Constraint::Length(4),
            Constraint::Percentage(24),
            Constraint::Percentage(24),
            Constraint::Percentage(24),
        ].as_ref())
        .split(area);

    let country = report.selection.country.label();
    let weather_title = format!("Monthly Temperature Data for {country}");
    match &report.weather {
        Ok(series) => draw_weather(f, rows[0], &weather_title, series),
        Err(e) => message(f, rows[0], &weather_title, e),
    }

    let title = format!("Anthropometric Data ({})", report.selection.brand.label());
    let summary = match &report.anthropometrics {
        Ok(e) => format!(
            "Mean Height: {} cm | Mean Weight: {} kg\nAverage BMR: {} kcal/day",
            e.height_cm, e.weight_kg, e.kcal_per_day
        ),
        Err(e) => format!("Error loading height/weight data: {e}"),
    };
    message(f, rows[1], &title, &summary);

    match &report.bmr_series {
        Ok(points) => draw_bmr(f, rows[2], points),
        Err(e) => message(f, rows[2], "BMR by Age Group", e),
    }
    match &report.height_series {
        Ok(values) => line_chart(f, rows[3], "Height by Age Group", "Mean Height(cm)", values, HEIGHT_AXIS),
        Err(e) => message(f, rows[3], "Height by Age Group", e),
    }
    match &report.weight_series {
        Ok(values) => line_chart(f, rows[4], "Weight by Age Group", "Mean Weight(kg)", values, WEIGHT_AXIS),
        Err(e) => message(f, rows[4], "Weight by Age Group", e),
    }
}

/// Do MAX_X_LABELS etykiet rozłożonych równomiernie po osi.
fn x_labels<'a>(labels: impl ExactSizeIterator<Item = &'a str>) -> Vec<Line<'a>> {
    let all: Vec<&str> = labels.collect();
    if all.len() <= MAX_X_LABELS {
        return all.into_iter().map(Line::from).collect();
    }
    let step = (all.len() - 1) as f64 / (MAX_X_LABELS - 1) as f64;
    (0..MAX_X_LABELS)
        .map(|i| Line::from(all[(i as f64 * step).round() as usize]))
        .collect()
}

fn indexed<T>(items: &[T], value: impl Fn(&T) -> f64) -> Vec<(f64, f64)> {
    items.iter().enumerate().map(|(i, it)| (i as f64, value(it))).collect()
}

fn x_bounds(len: usize) -> [f64; 2] {
    [0.0, len.saturating_sub(1).max(1) as f64]
}

fn y_labels(bounds: [f64; 2]) -> Vec<Line<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]].iter().map(|v| Line::from(format!("{v:.0}"))).collect()
}

fn draw_weather(f: &mut Frame, area: Rect, title: &str, series: &TemperatureSeries) {
    let max = indexed(&series.months, |m| m.max);
    let min = indexed(&series.months, |m| m.min);
    let bounds = series.bounds();
    let datasets = vec![
        Dataset::default()
            .name("Max Temperature (°C)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&max),
        Dataset::default()
            .name("Min Temperature (°C)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&min),
    ];
    let chart = Chart::new(datasets)
        .block(block(title))
        .x_axis(
            Axis::default()
                .title("Month")
                .bounds(x_bounds(series.months.len()))
                .labels(x_labels(series.months.iter().map(|m| m.month.as_str()))),
        )
        .y_axis(Axis::default().title("Temperature (°C)").bounds(bounds).labels(y_labels(bounds)));
    f.render_widget(chart, area);
}

fn draw_bmr(f: &mut Frame, area: Rect, points: &[SeriesPoint]) {
    let data = indexed(points, |p| p.bmr);
    let datasets = vec![
        Dataset::default()
            .name("BMR")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&data),
    ];
    let chart = Chart::new(datasets)
        .block(block("BMR by Age Group"))
        .x_axis(
            Axis::default()
                .title("Age Group")
                .bounds(x_bounds(points.len()))
                .labels(x_labels(points.iter().map(|p| p.label.as_str()))),
        )
        .y_axis(Axis::default().title("BMR").bounds(BMR_AXIS).labels(y_labels(BMR_AXIS)));
    f.render_widget(chart, area);
}

fn line_chart(f: &mut Frame, area: Rect, title: &str, y_title: &str, values: &[LabeledValue], y: [f64; 2]) {
    let data = indexed(values, |v| v.value);
    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&data),
    ];
    let chart = Chart::new(datasets)
        .block(block(title))
        .x_axis(
            Axis::default()
                .title("Age")
                .bounds(x_bounds(values.len()))
                .labels(x_labels(values.iter().map(|v| v.label.as_str()))),
        )
        .y_axis(Axis::default().title(y_title.to_string()).bounds(y).labels(y_labels(y)));
    f.render_widget(chart, area);
}

// Prawy panel: słupki wg klastra + pierwsze zgłoszenie każdego klastra
fn draw_issues(f: &mut Frame, area: Rect, report: &Report) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let title = format!("User Insights – {}", report.selection.source.label());
    let summary = match &report.issues {
        Ok(s) => s,
        Err(e) => {
            message(f, area, &title, e);
            return;
        }
    };
    if summary.is_empty() {
        message(f, area, &title, "No issues reported");
        return;
    }

    let labels: Vec<String> = summary.counts().map(|(id, _)| id.to_string()).collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(summary.counts())
        .map(|(label, (_, count))| (label.as_str(), count as u64))
        .collect();
    let bars = BarChart::default()
        .block(block(&title))
        .data(data.as_slice())
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::LightBlue))
        .value_style(Style::default().fg(Color::Black).bg(Color::LightBlue));
    f.render_widget(bars, parts[0]);

    message(f, parts[1], "Issues", &summary.text());
}
