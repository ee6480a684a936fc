use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn status_label(loading: bool, spinner_state: usize) -> String {
    if loading {
        let spinner_char = SPINNER_CHARS[spinner_state % SPINNER_CHARS.len()];
        format!("Searching... {spinner_char}")
    } else {
        "Ready".to_string()
    }
}

/// Cut `s` to at most `max` display columns, ending in `…` when cut.
pub fn truncate_display(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut width = 0usize;
    let mut out = String::new();
    for ch in s.chars() {
        let ch_w = ch.width().unwrap_or(0);
        if width + ch_w > max - 1 {
            break;
        }
        out.push(ch);
        width += ch_w;
    }
    out.push('…');
    out
}

/// Word wrap to `max` display columns. Words longer than a line are split.
pub fn wrap_display(s: &str, max: usize) -> Vec<String> {
    if max == 0 {
        return vec![String::new()];
    }
    let mut lines = Vec::new();
    for paragraph in s.split('\n') {
        let mut cur = String::new();
        let mut cur_w = 0usize;
        for word in paragraph.split_whitespace() {
            let word_w = word.width();
            let sep = usize::from(!cur.is_empty());
            if cur_w + sep + word_w <= max {
                if sep == 1 {
                    cur.push(' ');
                }
                cur.push_str(word);
                cur_w += sep + word_w;
                continue;
            }
            if !cur.is_empty() {
                lines.push(std::mem::take(&mut cur));
                cur_w = 0;
            }
            if word_w <= max {
                cur.push_str(word);
                cur_w = word_w;
                continue;
            }
            for ch in word.chars() {
                let ch_w = ch.width().unwrap_or(0);
                if cur_w + ch_w > max && !cur.is_empty() {
                    lines.push(std::mem::take(&mut cur));
                    cur_w = 0;
                }
                cur.push(ch);
                cur_w += ch_w;
            }
        }
        lines.push(cur);
    }
    lines
}
