/// Collection of char for the cards
pub enum TabChar {
    /// Vertical bar
    Bv,
    /// Horizontal bar
    Bh,
    /// Joint bottom left
    Jbl,
    /// Joint bottom right
    Jbr,
    /// Joint top left
    Jtl,
    /// Joint top right
    Jtr,
}

impl TabChar {
    /// Value of the element
    pub fn val(&self) -> char {
        match *self {
            Self::Bv => '│',
            Self::Bh => '─',
            Self::Jbl => '└',
            Self::Jbr => '┘',
            Self::Jtl => '┌',
            Self::Jtr => '┐',
        }
    }
}

/// Position of a border line inside a card
pub enum Position {
    Top,
    Bottom,
}
