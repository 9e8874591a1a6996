//! Reset/disable button affordance.

use crate::options::WidgetOptions;

/// Glyph drawn for reset states.
pub const RESET_GLYPH: &str = "\u{21ba}";
/// Glyph drawn for disable states.
pub const DISABLE_GLYPH: &str = "\u{2298}";

/// State of the button at the right edge of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// Neither sentinel configured, nothing drawn.
    None,
    /// Value differs from `reset`; clicking restores it.
    Reset,
    /// Value differs from `disable`; clicking restores it.
    Disable,
    /// Value already equals `reset`.
    NoReset,
    /// Value already equals `disable`.
    NoDisable,
}

impl ButtonState {
    /// Evaluate the decision table for a value.
    ///
    /// Rows are checked in order; `Reset` takes priority over `Disable`.
    pub fn evaluate(value: f64, options: &WidgetOptions) -> Self {
        match (options.reset, options.disable) {
            (None, None) => ButtonState::None,
            (Some(reset), _) if value != reset => ButtonState::Reset,
            (_, Some(disable)) if value != disable => ButtonState::Disable,
            (Some(_), _) => ButtonState::NoReset,
            _ => ButtonState::NoDisable,
        }
    }

    /// Whether clicking the button changes the value.
    pub fn is_actionable(self) -> bool {
        matches!(self, ButtonState::Reset | ButtonState::Disable)
    }

    /// Whether anything is drawn.
    pub fn is_visible(self) -> bool {
        self != ButtonState::None
    }

    /// Glyph for this state.
    pub fn glyph(self) -> &'static str {
        match self {
            ButtonState::Reset | ButtonState::NoReset => RESET_GLYPH,
            _ => DISABLE_GLYPH,
        }
    }

    /// Value the button restores, if it is actionable.
    pub fn target(self, options: &WidgetOptions) -> Option<f64> {
        match self {
            ButtonState::Reset => options.reset,
            ButtonState::Disable => options.disable,
            _ => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ButtonState::None => "None",
            ButtonState::Reset => "Reset",
            ButtonState::Disable => "Disable",
            ButtonState::NoReset => "No Reset",
            ButtonState::NoDisable => "No Disable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both() -> WidgetOptions {
        WidgetOptions::new().with_reset(0.0).with_disable(-1.0)
    }

    #[test]
    fn test_none_without_sentinels() {
        assert_eq!(
            ButtonState::evaluate(5.0, &WidgetOptions::new()),
            ButtonState::None
        );
    }

    #[test]
    fn test_reset_takes_priority() {
        assert_eq!(ButtonState::evaluate(5.0, &both()), ButtonState::Reset);
        // value equals disable but not reset: still Reset
        assert_eq!(ButtonState::evaluate(-1.0, &both()), ButtonState::Reset);
    }

    #[test]
    fn test_at_reset_falls_through_to_disable() {
        assert_eq!(ButtonState::evaluate(0.0, &both()), ButtonState::Disable);
    }

    #[test]
    fn test_no_reset_when_sentinels_coincide() {
        let options = WidgetOptions::new().with_reset(0.0).with_disable(0.0);
        assert_eq!(ButtonState::evaluate(0.0, &options), ButtonState::NoReset);
    }

    #[test]
    fn test_disable_only() {
        let options = WidgetOptions::new().with_disable(-1.0);
        assert_eq!(ButtonState::evaluate(3.0, &options), ButtonState::Disable);
        assert_eq!(ButtonState::evaluate(-1.0, &options), ButtonState::NoDisable);
    }

    #[test]
    fn test_reset_only() {
        let options = WidgetOptions::new().with_reset(1.0);
        assert_eq!(ButtonState::evaluate(2.0, &options), ButtonState::Reset);
        assert_eq!(ButtonState::evaluate(1.0, &options), ButtonState::NoReset);
    }

    #[test]
    fn test_glyphs_and_actions() {
        assert_eq!(ButtonState::Reset.glyph(), RESET_GLYPH);
        assert_eq!(ButtonState::NoReset.glyph(), RESET_GLYPH);
        assert_eq!(ButtonState::Disable.glyph(), DISABLE_GLYPH);
        assert_eq!(ButtonState::NoDisable.glyph(), DISABLE_GLYPH);

        assert!(ButtonState::Reset.is_actionable());
        assert!(!ButtonState::NoDisable.is_actionable());
        assert_eq!(ButtonState::Disable.target(&both()), Some(-1.0));
        assert_eq!(ButtonState::NoReset.target(&both()), None);
        assert_eq!(ButtonState::NoReset.name(), "No Reset");
    }
}
