use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Quiz page: question pane, result pane, status bar
pub struct QuizLayout {
    pub question_area: Rect,
    pub results_area: Rect,
    pub status_area: Rect,
}

impl QuizLayout {
    /// - Question: 40% width (left)
    /// - Results: 60% width (right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(vertical_chunks[0]);

        Self {
            question_area: horizontal_chunks[0],
            results_area: horizontal_chunks[1],
            status_area: vertical_chunks[1],
        }
    }
}

/// Catalog page: query bar on top, filters beside results, status bar
pub struct CatalogLayout {
    pub query_area: Rect,
    pub filters_area: Rect,
    pub results_area: Rect,
    pub status_area: Rect,
}

impl CatalogLayout {
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Query input with border
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(vertical_chunks[1]);

        Self {
            query_area: vertical_chunks[0],
            filters_area: horizontal_chunks[0],
            results_area: horizontal_chunks[1],
            status_area: vertical_chunks[2],
        }
    }

    /// Area of the history dropdown: under the query bar, over the page
    pub fn dropdown_area(&self, rows: usize) -> Rect {
        let below = self.query_area.y + self.query_area.height;
        let available = self.status_area.y.saturating_sub(below);
        // Two rows per item plus borders
        let wanted = (rows as u16).saturating_mul(2).saturating_add(2);
        Rect::new(self.query_area.x, below, self.query_area.width, wanted.min(available))
    }
}
