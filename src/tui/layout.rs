/// Responsive breakpoint system for TUI layout decisions.
///
/// Single source of truth for width thresholds - no magic numbers scattered in render code.
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: phone-sized, everything stacked
    Compact,
    /// 60-99 cols: half-screen
    Normal,
    /// 100+ cols: full terminal, side-by-side cards
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
        }
    }
}

/// Split `area` into `n` equal cards: side by side when at least `min`
/// wide, stacked otherwise
pub fn cards(area: Rect, n: u32, min: Breakpoint) -> Rc<[Rect]> {
    let side_by_side = Breakpoint::from_width(area.width).at_least(min);
    let direction = if side_by_side {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    Layout::default()
        .direction(direction)
        .constraints((0..n).map(|_| Constraint::Ratio(1, n)))
        .split(area)
}

/// Centre a fixed-size box inside `area`, clamped to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(99), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(100), Breakpoint::Wide);
        assert_eq!(Breakpoint::from_width(220), Breakpoint::Wide);
    }

    #[test]
    fn cards_stack_on_narrow_terminals() {
        let narrow = cards(Rect::new(0, 0, 50, 20), 2, Breakpoint::Normal);
        assert_eq!(narrow[0].width, 50);
        assert_eq!(narrow[0].height, 10);

        let wide = cards(Rect::new(0, 0, 120, 20), 2, Breakpoint::Normal);
        assert_eq!(wide[0].width, 60);
        assert_eq!(wide[0].height, 20);
    }

    #[test]
    fn centered_rect_is_clamped() {
        let r = centered_rect(80, 40, Rect::new(0, 0, 60, 20));
        assert_eq!(r, Rect::new(0, 0, 60, 20));

        let r = centered_rect(20, 10, Rect::new(0, 0, 60, 20));
        assert_eq!(r, Rect::new(20, 5, 20, 10));
    }
}
