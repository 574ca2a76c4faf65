//! Detail popup: the full record of one KPI or use case, floating over the
//! results or an industry page.
//!
//! Close with `Escape` or `q`; `o` opens the page of the owning industry.

use super::centered_rect;
use crate::theme::Theme;
use kpidex_core::Displayable;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

pub struct DetailPopup<'a> {
    item: &'a Displayable<'a>,
    theme: &'a Theme,
}

impl<'a> DetailPopup<'a> {
    pub fn new(item: &'a Displayable<'a>, theme: &'a Theme) -> Self {
        Self { item, theme }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let mut lines = vec![
            Line::from(vec![
                Span::styled(self.item.title(), self.theme.detail_title),
                Span::styled(
                    format!("  [{}]", self.item.kind_label()),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ]),
            Line::from(vec![
                Span::styled("Industry: ", self.theme.detail_label),
                Span::raw(self.item.industry()),
            ]),
        ];
        for (label, value) in self.item.fields() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(label, self.theme.detail_label)));
            lines.push(Line::from(value));
        }
        lines
    }
}

impl Widget for DetailPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(72, 20, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" details (o: open industry, Esc: close) ")
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        Paragraph::new(self.lines())
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kpidex_core::{Kpi, KpiView};

    #[test]
    fn missing_fields_render_as_na() {
        let kpi = Kpi {
            name: "Net Interest Margin".to_string(),
            formula: None,
            explanation: None,
        };
        let item = Displayable::Kpi(KpiView {
            kpi: &kpi,
            subdepartment: "Retail",
            industry: "Banking",
        });
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        DetailPopup::new(&item, &theme).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Net Interest Margin"));
        assert!(text.contains("Industry: Banking"));
        assert!(text.contains("N/A"));
    }
}
