//! Light/dark colour mode.
//!
//! The theme is owned by the page: a toggle writes `data-theme` on the root
//! element and remembers the choice in local storage. Effects never own it.
//! They subscribe to a [`ThemeHub`] and get the current value right away,
//! then every change.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::Error;

/// Root element attribute carrying the active theme.
pub const THEME_ATTRIBUTE: &str = "data-theme";
/// Local storage key for the persisted preference.
pub const STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Read of the root attribute as the background sees it. A missing or
    /// empty attribute counts as `"light"`, and anything but `"light"` is dark.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some("light") => Theme::Light,
            Some(_) => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Favicon matching this theme.
    pub fn favicon_href(self) -> &'static str {
        match self {
            Theme::Light => "/light-bg.png",
            Theme::Dark => "/dark-bg.png",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::UnknownTheme(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(Theme)>;

/// Subscription point for the shared theme flag.
///
/// Listeners are called synchronously and must not call back into the hub.
pub struct ThemeHub {
    current: Theme,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Default for ThemeHub {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl fmt::Debug for ThemeHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeHub")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ThemeHub {
    pub fn new(initial: Theme) -> Self {
        Self {
            current: initial,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Register `listener`. It is invoked once immediately with the current
    /// theme.
    pub fn subscribe<F>(&mut self, mut listener: F) -> SubscriptionId
    where
        F: FnMut(Theme) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        listener(self.current);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Store `theme` and notify listeners. Setting the current value again is
    /// a no-op; returns whether anything changed.
    pub fn set(&mut self, theme: Theme) -> bool {
        if theme == self.current {
            return false;
        }
        debug!(from = %self.current, to = %theme, "theme changed");
        self.current = theme;
        for (_, listener) in &mut self.listeners {
            listener(theme);
        }
        true
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Key/value storage for user preferences.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}

/// In-memory store, used off the browser.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }
}

/// The theme switch: remembers the user's choice across reloads.
#[derive(Debug)]
pub struct ThemeToggle<S> {
    store: S,
    theme: Theme,
}

impl<S: PreferenceStore> ThemeToggle<S> {
    /// Restore the stored preference. Anything unreadable counts as light.
    pub fn new(store: S) -> Self {
        let theme = store
            .load(STORAGE_KEY)
            .and_then(|raw| raw.parse::<Theme>().ok())
            .unwrap_or_default();
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip, persist, and return the new theme.
    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled());
        self.theme
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        self.store.save(STORAGE_KEY, theme.as_str());
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
