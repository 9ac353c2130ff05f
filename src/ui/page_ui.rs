use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::strings::{fit_width, sanitize_label};

const TITLE_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 3;
/// Index column, e.g. " 12 "
const INDEX_WIDTH: usize = 4;
/// "> " highlight symbol
const SYMBOL_WIDTH: usize = 2;

/// Tools page renderer (Stateless Renderer)
pub struct UI;

impl UI {
    pub fn new() -> Self {
        Self
    }

    /// Rows left for the tool list on a terminal `height` rows tall
    pub fn list_rows(height: u16) -> usize {
        height
            .saturating_sub(TITLE_HEIGHT + STATUS_HEIGHT)
            .saturating_sub(2) as usize
    }

    pub fn render(&self, f: &mut Frame, state: &crate::core::state::State, cli: &crate::cli::Opts) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TITLE_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .split(f.area());

        let border_type = if cli.rounded_borders {
            BorderType::Rounded
        } else {
            BorderType::Plain
        };
        let block = |title: &str, color| {
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(
                    format!(" {} ", title),
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .fg(cli.header_title_color),
                ))
                .border_type(border_type)
        };

        // Title: (focused/total) and the tools directory
        let title = Line::from(vec![
            Span::styled("(", Style::default().fg(cli.main_text_color)),
            Span::styled(
                state.selected.map_or(0, |v| v + 1).to_string(),
                Style::default().fg(cli.highlight_color),
            ),
            Span::styled("/", Style::default().fg(cli.main_text_color)),
            Span::styled(
                state.tools.len().to_string(),
                Style::default().fg(cli.main_text_color),
            ),
            Span::styled(") ", Style::default().fg(cli.main_text_color)),
            Span::styled(
                cli.tools_dir.display().to_string(),
                Style::default().fg(cli.main_text_color),
            ),
        ]);
        f.render_widget(
            Paragraph::new(title).block(block("Tools", cli.main_border_color)),
            chunks[0],
        );

        // Tool list, only the visible slice
        let list_area = chunks[1];
        let max_visible = list_area.height.saturating_sub(2) as usize;
        let text_width = (list_area.width.saturating_sub(2) as usize)
            .saturating_sub(INDEX_WIDTH + SYMBOL_WIDTH);

        let items: Vec<ListItem> = state
            .tools
            .iter()
            .enumerate()
            .skip(state.scroll_offset)
            .take(max_visible)
            .map(|(idx, tool)| {
                let label = sanitize_label(&tool.display_name);
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>3} ", idx + 1),
                        Style::default().fg(cli.label_color),
                    ),
                    Span::styled(
                        fit_width(&label, text_width).to_string(),
                        Style::default().fg(cli.tools_text_color),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block("Scripts & Panels", cli.tools_border_color))
            .highlight_style(
                Style::default()
                    .fg(cli.highlight_color)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        if let Some(sel) = state.selected {
            if sel >= state.scroll_offset && sel < state.scroll_offset + max_visible {
                list_state.select(Some(sel - state.scroll_offset));
            }
        }
        f.render_stateful_widget(list, list_area, &mut list_state);

        // Status: where the focused tool lives and how it got its name
        let status = match state.selected_tool() {
            Some(tool) => {
                let target = match &tool.path {
                    Some(path) => path.display().to_string(),
                    None => tool.target().replace('\t', " "),
                };
                format!("{} [{}]", target, tool.source)
            }
            None => "No tools found".to_string(),
        };
        f.render_widget(
            Paragraph::new(status)
                .style(Style::default().fg(cli.status_text_color))
                .block(block("Status", cli.status_border_color)),
            chunks[2],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{Message, State};
    use crate::tools::hardware::{PanelKind, RfModule};
    use crate::tools::ToolDescriptor;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn tool(name: &str) -> ToolDescriptor {
        let mut t = ToolDescriptor::panel(PanelKind::SpectrumAnalyser, RfModule::External, 16);
        t.display_name = name.to_string();
        t
    }

    #[test]
    fn test_list_rows() {
        assert_eq!(UI::list_rows(20), 12);
        assert_eq!(UI::list_rows(5), 0);
    }

    #[test]
    fn test_render_page() {
        let cli = crate::cli::Opts::default();
        let mut state = State::new(vec![tool("Gimbal"), tool("\x1b[1mWizard")], false);
        state.update(Message::Resize(UI::list_rows(12)));
        state.update(Message::Down);

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|f| UI::new().render(f, &state, &cli)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("(2/2)"));
        assert!(text.contains("  1 Gimbal"));
        assert!(text.contains(">   2 Wizard"));
        assert!(text.contains("panel spectrum external [builtin]"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_render_empty_page() {
        let cli = crate::cli::Opts::default();
        let state = State::new(Vec::new(), false);

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal.draw(|f| UI::new().render(f, &state, &cli)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("(0/0)"));
        assert!(text.contains("No tools found"));
    }
}
