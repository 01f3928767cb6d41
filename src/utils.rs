use crate::utils::models::{Position, TabChar};

pub mod models;

/// Border line of `count` cards, each `width` chars wide between the bars
pub fn line_cards(width: usize, count: usize, pos: &Position) -> String {
    let (left, right) = match pos {
        Position::Top => (TabChar::Jtl.val(), TabChar::Jtr.val()),
        Position::Bottom => (TabChar::Jbl.val(), TabChar::Jbr.val()),
    };

    // Room for the padding spaces inside the card
    let bar = TabChar::Bh.val().to_string().repeat(width + 2);

    (0..count)
        .map(|_| format!("{left}{bar}{right}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Content line of `count` cards
pub fn content_cards(width: usize, texts: &[String]) -> String {
    let sep = TabChar::Bv.val();

    texts
        .iter()
        .map(|text| format!("{sep} {:<width$} {sep}", etc_str(text, width)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shorten a string so it fits in `width` chars
pub fn etc_str(data: &str, width: usize) -> String {
    if data.chars().count() <= width {
        return data.to_owned();
    }

    let mut short: String = data.chars().take(width.saturating_sub(1)).collect();
    short.push('…');

    short
}
