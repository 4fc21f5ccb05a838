//! Process-wide language and theme, observable by every view.

use makeupify_types::{Language, Theme};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub language: Language,
    pub theme: Theme,
}

/// Shared cell holding the current [`Preferences`].
///
/// Updates notify all subscribers. Nothing is persisted; a restart returns
/// to the configured defaults.
#[derive(Debug, Clone)]
pub struct PreferencesCell {
    tx: watch::Sender<Preferences>,
}

impl PreferencesCell {
    #[must_use]
    pub fn new(initial: Preferences) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    #[must_use]
    pub fn get(&self) -> Preferences {
        *self.tx.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.tx.subscribe()
    }

    pub fn toggle_theme(&self) -> Theme {
        self.tx.send_modify(|p| p.theme = p.theme.toggled());
        self.get().theme
    }

    pub fn set_language(&self, language: Language) {
        self.tx.send_if_modified(|p| {
            let changed = p.language != language;
            p.language = language;
            changed
        });
    }

    pub fn cycle_language(&self) -> Language {
        self.tx.send_modify(|p| p.language = p.language.next());
        self.get().language
    }
}

impl Default for PreferencesCell {
    fn default() -> Self {
        Self::new(Preferences::default())
    }
}
