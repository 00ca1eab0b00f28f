//! Terminal stand-in for the game-server host.

use permkit::{strip_colors, PluginHost};

/// Prints every message to stdout, optionally without colour codes.
pub struct ConsoleHost {
    plugin: String,
    plain: bool,
    online: Vec<String>,
}

impl ConsoleHost {
    pub fn new(plugin: impl Into<String>, plain: bool) -> Self {
        Self {
            plugin: plugin.into(),
            plain,
            online: Vec::new(),
        }
    }

    /// Players to treat as online.
    pub fn with_online(mut self, online: Vec<String>) -> Self {
        self.online = online;
        self
    }

    pub fn render(&self, text: &str) -> String {
        if self.plain {
            strip_colors(text)
        } else {
            text.to_string()
        }
    }
}

impl PluginHost for ConsoleHost {
    type Sender = ();

    fn plugin_name(&self) -> &str {
        &self.plugin
    }

    fn notify(&self, _sender: &(), text: &str) {
        println!("{}", self.render(text));
    }

    // Player names are case-insensitive on the server.
    fn is_player_online(&self, name: &str) -> bool {
        self.online.iter().any(|p| p.eq_ignore_ascii_case(name))
    }
}
