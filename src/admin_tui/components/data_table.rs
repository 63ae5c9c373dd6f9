//! Generic table component: headers plus one rendered row per item

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::admin_tui::ui::{truncate_to_width, Styles};

/// A column header with its display width
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub width: u16,
}

impl Column {
    pub fn new(header: &str, width: u16) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

/// Header row followed by body rows, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct TableRows {
    pub header: Vec<String>,
    pub body: Vec<Vec<String>>,
}

impl TableRows {
    /// Header plus body
    pub fn row_count(&self) -> usize {
        1 + self.body.len()
    }
}

/// Map `items` to rows with `render_row`. No sorting or filtering.
pub fn build_rows<T, F>(headers: &[String], items: &[T], render_row: F) -> TableRows
where
    F: Fn(&T) -> Vec<String>,
{
    TableRows {
        header: headers.to_vec(),
        body: items.iter().map(render_row).collect(),
    }
}

/// Table widget with selection state
#[derive(Debug, Default)]
pub struct DataTable {
    pub columns: Vec<Column>,
    pub state: TableState,
}

impl DataTable {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            state: TableState::default(),
        }
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header.clone()).collect()
    }

    /// Render `items` with one row each; `title` goes on the border
    pub fn render<T, F>(
        &mut self,
        f: &mut Frame,
        area: Rect,
        items: &[T],
        render_row: F,
        title: &str,
        focused: bool,
    ) where
        F: Fn(&T) -> Vec<String>,
    {
        let rows = build_rows(&self.headers(), items, render_row);

        let header = Row::new(
            rows.header
                .iter()
                .map(|h| Cell::from(h.clone()).style(Styles::title())),
        );

        let body: Vec<Row> = rows
            .body
            .iter()
            .map(|cells| {
                Row::new(cells.iter().zip(&self.columns).map(|(text, column)| {
                    Cell::from(truncate_to_width(text, column.width as usize))
                }))
            })
            .collect();

        let widths: Vec<Constraint> = self
            .columns
            .iter()
            .map(|c| Constraint::Length(c.width))
            .collect();

        let border_style = if focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let table = Table::new(body, widths)
            .header(header)
            .block(
                Block::default()
                    .title(title.to_string())
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .highlight_style(Styles::selected());

        f.render_stateful_widget(table, area, &mut self.state);
    }
}
