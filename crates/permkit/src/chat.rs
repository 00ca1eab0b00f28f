//! Legacy chat formatting codes.
//!
//! Game clients render `§` followed by a code character as a colour or
//! style switch. Message templates in this crate name colours in braces
//! (`"{RED}No permissions found."`) and [`colorize`] expands them.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Prefix character of every formatting code.
pub const COLOR_CHAR: char = '§';

static TEMPLATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_]+)\}").expect("template pattern must compile"));

static COLOR_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)§[0-9a-fk-or]").expect("color pattern must compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    Magic,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    Reset,
}

impl ChatColor {
    pub const ALL: [ChatColor; 22] = [
        ChatColor::Black,
        ChatColor::DarkBlue,
        ChatColor::DarkGreen,
        ChatColor::DarkAqua,
        ChatColor::DarkRed,
        ChatColor::DarkPurple,
        ChatColor::Gold,
        ChatColor::Gray,
        ChatColor::DarkGray,
        ChatColor::Blue,
        ChatColor::Green,
        ChatColor::Aqua,
        ChatColor::Red,
        ChatColor::LightPurple,
        ChatColor::Yellow,
        ChatColor::White,
        ChatColor::Magic,
        ChatColor::Bold,
        ChatColor::Strikethrough,
        ChatColor::Underline,
        ChatColor::Italic,
        ChatColor::Reset,
    ];

    pub fn code(self) -> char {
        match self {
            ChatColor::Black => '0',
            ChatColor::DarkBlue => '1',
            ChatColor::DarkGreen => '2',
            ChatColor::DarkAqua => '3',
            ChatColor::DarkRed => '4',
            ChatColor::DarkPurple => '5',
            ChatColor::Gold => '6',
            ChatColor::Gray => '7',
            ChatColor::DarkGray => '8',
            ChatColor::Blue => '9',
            ChatColor::Green => 'a',
            ChatColor::Aqua => 'b',
            ChatColor::Red => 'c',
            ChatColor::LightPurple => 'd',
            ChatColor::Yellow => 'e',
            ChatColor::White => 'f',
            ChatColor::Magic => 'k',
            ChatColor::Bold => 'l',
            ChatColor::Strikethrough => 'm',
            ChatColor::Underline => 'n',
            ChatColor::Italic => 'o',
            ChatColor::Reset => 'r',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChatColor::Black => "BLACK",
            ChatColor::DarkBlue => "DARK_BLUE",
            ChatColor::DarkGreen => "DARK_GREEN",
            ChatColor::DarkAqua => "DARK_AQUA",
            ChatColor::DarkRed => "DARK_RED",
            ChatColor::DarkPurple => "DARK_PURPLE",
            ChatColor::Gold => "GOLD",
            ChatColor::Gray => "GRAY",
            ChatColor::DarkGray => "DARK_GRAY",
            ChatColor::Blue => "BLUE",
            ChatColor::Green => "GREEN",
            ChatColor::Aqua => "AQUA",
            ChatColor::Red => "RED",
            ChatColor::LightPurple => "LIGHT_PURPLE",
            ChatColor::Yellow => "YELLOW",
            ChatColor::White => "WHITE",
            ChatColor::Magic => "MAGIC",
            ChatColor::Bold => "BOLD",
            ChatColor::Strikethrough => "STRIKETHROUGH",
            ChatColor::Underline => "UNDERLINE",
            ChatColor::Italic => "ITALIC",
            ChatColor::Reset => "RESET",
        }
    }
}

impl fmt::Display for ChatColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", COLOR_CHAR, self.code())
    }
}

impl FromStr for ChatColor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Expand `{COLOR}` tokens. Unknown tokens are left as written.
pub fn colorize(template: &str) -> String {
    TEMPLATE_TOKEN
        .replace_all(template, |caps: &Captures<'_>| match caps[1].parse::<ChatColor>() {
            Ok(color) => color.to_string(),
            Err(()) => caps[0].to_string(),
        })
        .into_owned()
}

/// Remove formatting codes, leaving plain text.
pub fn strip_colors(text: &str) -> String {
    COLOR_CODE.replace_all(text, "").into_owned()
}
