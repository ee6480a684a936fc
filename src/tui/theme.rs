use ratatui::style::{Color, Modifier, Style};

const WHATSAPP_GREEN: Color = Color::Rgb(0x25, 0xD3, 0x66);
const WHATSAPP_TEAL: Color = Color::Rgb(0x12, 0x8C, 0x7E);

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub header_style: Style,
    pub border_style: Style,
    pub focus_border_style: Style,
    pub input_style: Style,
    pub chip_style: Style,
    pub chip_active_style: Style,
    pub chip_cursor_style: Style,
    pub card_title_style: Style,
    pub card_meta_style: Style,
    pub card_body_style: Style,
    pub tag_style: Style,
    pub link_style: Style,
    pub selected_style: Style,
    pub skeleton_style: Style,
    pub footer_style: Style,
    pub notice_style: Style,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            header_style: Style::default()
                .fg(WHATSAPP_GREEN)
                .add_modifier(Modifier::BOLD),
            border_style: Style::default().fg(Color::DarkGray),
            focus_border_style: Style::default().fg(WHATSAPP_GREEN),
            input_style: Style::default().fg(Color::White),
            chip_style: Style::default().fg(Color::Gray),
            chip_active_style: Style::default().bg(WHATSAPP_GREEN).fg(Color::Black),
            chip_cursor_style: Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
            card_title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            card_meta_style: Style::default().fg(WHATSAPP_GREEN),
            card_body_style: Style::default().fg(Color::Gray),
            tag_style: Style::default().fg(Color::LightCyan),
            link_style: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            selected_style: Style::default().bg(Color::Rgb(0x1f, 0x2c, 0x34)),
            skeleton_style: Style::default().fg(Color::DarkGray),
            footer_style: Style::default().fg(Color::DarkGray),
            notice_style: Style::default().fg(Color::Yellow),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            header_style: Style::default()
                .fg(WHATSAPP_TEAL)
                .add_modifier(Modifier::BOLD),
            border_style: Style::default().fg(Color::Gray),
            focus_border_style: Style::default().fg(WHATSAPP_TEAL),
            input_style: Style::default().fg(Color::Black),
            chip_style: Style::default().fg(Color::DarkGray),
            chip_active_style: Style::default().bg(WHATSAPP_TEAL).fg(Color::White),
            chip_cursor_style: Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
            card_title_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_meta_style: Style::default().fg(WHATSAPP_TEAL),
            card_body_style: Style::default().fg(Color::DarkGray),
            tag_style: Style::default().fg(Color::Blue),
            link_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            selected_style: Style::default().bg(Color::Rgb(0xe7, 0xf8, 0xee)),
            skeleton_style: Style::default().fg(Color::Gray),
            footer_style: Style::default().fg(Color::DarkGray),
            notice_style: Style::default().fg(Color::Magenta),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }
}
