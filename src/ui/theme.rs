/// ANSI colors for the terminal shell, light or dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: &'static str,
    pub muted: &'static str,
    pub primary: &'static str,
    pub error: &'static str,
}

const RESET: &str = "\x1b[0m";

pub fn palette(is_dark: bool) -> Palette {
    if is_dark {
        Palette {
            text: "\x1b[38;2;245;245;245m",
            muted: "\x1b[38;2;136;136;136m",
            primary: "\x1b[38;2;52;211;153m",
            error: "\x1b[38;2;229;62;62m",
        }
    } else {
        Palette {
            text: "\x1b[38;2;51;51;51m",
            muted: "\x1b[38;2;136;136;136m",
            primary: "\x1b[38;2;16;150;100m",
            error: "\x1b[38;2;229;62;62m",
        }
    }
}

impl Palette {
    pub fn paint(&self, color: &str, text: &str) -> String {
        format!("{color}{text}{RESET}")
    }
}
