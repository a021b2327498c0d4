use crate::cli::ColorWhen;
use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

/// Resolved output settings for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(json: bool, verbose: u8, cli_color: Option<ColorWhen>) -> Self {
        Self::from_caps(json, verbose, cli_color, detect_capabilities())
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        caps: TerminalCapabilities,
    ) -> Self {
        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => caps.supports_color && !caps.is_ci,
        };

        Self {
            json,
            verbose,
            color,
            unicode: caps.supports_unicode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tty_caps(is_ci: bool) -> TerminalCapabilities {
        TerminalCapabilities {
            supports_color: true,
            supports_unicode: true,
            is_ci,
        }
    }

    #[test]
    fn auto_color_disabled_in_ci() {
        let ui = UiContext::from_caps(false, 0, None, tty_caps(true));
        assert!(!ui.color);
    }

    #[test]
    fn auto_color_enabled_on_tty() {
        let ui = UiContext::from_caps(false, 0, Some(ColorWhen::Auto), tty_caps(false));
        assert!(ui.color);
    }

    #[test]
    fn cli_flag_overrides_detection() {
        let never = UiContext::from_caps(false, 0, Some(ColorWhen::Never), tty_caps(false));
        assert!(!never.color);

        let mut piped = tty_caps(false);
        piped.supports_color = false;
        let always = UiContext::from_caps(false, 0, Some(ColorWhen::Always), piped);
        assert!(always.color);
    }
}
