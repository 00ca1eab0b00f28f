//! Capabilities provided by the game-server host.
//!
//! The helpers never reach into the server directly. Whatever embeds them
//! implements [`PluginHost`] to deliver messages and answer player lookups.

use crate::chat::colorize;

pub trait PluginHost {
    /// Whoever issued the command: a player, the console, a command block.
    type Sender;

    /// Name of the plugin the helpers run under. Used to mark permissions
    /// granted by other plugins.
    fn plugin_name(&self) -> &str;

    /// Send one line of chat text to `sender`.
    fn notify(&self, sender: &Self::Sender, text: &str);

    /// Whether a player with exactly this name is currently online.
    fn is_player_online(&self, name: &str) -> bool;

    /// Send a block of lines. Hosts with paging override this.
    fn display_lines(&self, sender: &Self::Sender, lines: &[String]) {
        for line in lines {
            self.notify(sender, line);
        }
    }
}

/// Warn `sender` when `player_name` is not online, since the name may be a typo.
pub fn check_player<H: PluginHost>(host: &H, sender: &H::Sender, player_name: &str) {
    if !host.is_player_online(player_name) {
        host.notify(
            sender,
            &colorize("{GRAY}(Player not online, make sure the name is correct)"),
        );
    }
}
