// SPDX-License-Identifier: MPL-2.0
//! Pages selectable from the sidebar.

/// The panel shown in the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Video,
    Music,
    Player,
    Settings,
}

impl Page {
    /// Sidebar order.
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Video,
        Page::Music,
        Page::Player,
        Page::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Video => "Video",
            Page::Music => "Music",
            Page::Player => "Player",
            Page::Settings => "Settings",
        }
    }

    /// Glyph shown when the sidebar is collapsed.
    pub fn glyph(self) -> &'static str {
        match self {
            Page::Home => "⌂",
            Page::Video => "▤",
            Page::Music => "♫",
            Page::Player => "▶",
            Page::Settings => "⚙",
        }
    }

    /// Whether the page hosts the playback surface.
    pub fn is_player(self) -> bool {
        self == Page::Player
    }
}
