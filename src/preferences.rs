//! Dashboard preferences: theme, custom colors, menu ordering and landing page
//!
//! They are read from and written to the [`LocalStorage`]. Malformed values fall back to their defaults.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::storage::LocalStorage;

const THEME_KEY: &str = "theme";
const CUSTOM_THEME_KEY: &str = "customTheme";
const MENU_ORDER_KEY: &str = "menuOrder";
const DEFAULT_PAGE_KEY: &str = "defaultPage";

/// The pages of the navigation menu
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    Todos,
    Widgets,
    Community,
    Settings,
}

impl Page {
    pub const ALL: [Page; 5] = [Page::Home, Page::Todos, Page::Widgets, Page::Community, Page::Settings];
}

impl Display for Page {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Page::Home => "home",
            Page::Todos => "todos",
            Page::Widgets => "widgets",
            Page::Community => "community",
            Page::Settings => "settings",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL.iter()
            .find(|page| page.to_string() == s.trim().to_ascii_lowercase())
            .copied()
            .ok_or_else(|| format!("unknown page {:?}", s))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeChoice {
    Light,
    Dark,
    Custom,
}

impl Display for ThemeChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeChoice::Light => write!(f, "light"),
            ThemeChoice::Dark => write!(f, "dark"),
            ThemeChoice::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for ThemeChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeChoice::Light),
            "dark" => Ok(ThemeChoice::Dark),
            "custom" => Ok(ThemeChoice::Custom),
            other => Err(format!("unknown theme {:?}", other)),
        }
    }
}


/// Colors and font of the custom theme. Colors are stored as normalized hex strings.
///
/// It is serialized as is, but read back through a tolerant decoder (see `Preferences::load`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CustomTheme {
    primary: String,
    accent: String,
    gradient: Option<(String, String)>,
    font: String,
}

impl Default for CustomTheme {
    fn default() -> Self {
        Self {
            primary: "#4a90e2".to_string(),
            accent: "#f5a623".to_string(),
            gradient: None,
            font: "sans-serif".to_string(),
        }
    }
}

/// Parse any CSS color, and return its hex form
pub fn normalize_color(color: &str) -> Result<String, Box<dyn Error>> {
    let parsed = csscolorparser::parse(color.trim())
        .map_err(|err| format!("invalid color {:?}: {}", color, err))?;
    Ok(parsed.to_hex_string())
}

impl CustomTheme {
    pub fn new(primary: &str, accent: &str, gradient: Option<(&str, &str)>, font: &str) -> Result<Self, Box<dyn Error>> {
        let gradient = match gradient {
            None => None,
            Some((from, to)) => Some((normalize_color(from)?, normalize_color(to)?)),
        };
        let font = font.trim();
        if font.is_empty() {
            return Err("the font must not be empty".into());
        }

        Ok(Self {
            primary: normalize_color(primary)?,
            accent: normalize_color(accent)?,
            gradient,
            font: font.to_string(),
        })
    }

    pub fn primary(&self) -> &str { &self.primary }
    pub fn accent(&self) -> &str  { &self.accent }
    pub fn font(&self) -> &str    { &self.font }
    pub fn gradient(&self) -> Option<(&str, &str)> {
        self.gradient.as_ref().map(|(from, to)| (from.as_str(), to.as_str()))
    }

    /// Decode a stored custom theme. Every invalid field is replaced by its default.
    fn decode(raw: &str) -> Self {
        #[derive(Deserialize)]
        struct Raw {
            primary: Option<String>,
            accent: Option<String>,
            gradient: Option<Vec<String>>,
            font: Option<String>,
        }

        let defaults = Self::default();
        let raw: Raw = match serde_json::from_str(raw) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("Invalid custom theme ({}). Using the default one", err);
                return defaults;
            },
        };

        let color_or = |value: Option<String>, default: &str| -> String {
            match value.as_deref().map(normalize_color) {
                Some(Ok(color)) => color,
                Some(Err(err)) => {
                    log::warn!("{}. Using {}", err, default);
                    default.to_string()
                },
                None => default.to_string(),
            }
        };

        let gradient = match raw.gradient {
            Some(stops) if stops.len() == 2 => {
                match (normalize_color(&stops[0]), normalize_color(&stops[1])) {
                    (Ok(from), Ok(to)) => Some((from, to)),
                    _ => {
                        log::warn!("Invalid gradient {:?}, ignoring it", stops);
                        None
                    },
                }
            },
            Some(stops) => {
                log::warn!("A gradient needs two colors, got {:?}. Ignoring it", stops);
                None
            },
            None => None,
        };

        Self {
            primary: color_or(raw.primary, &defaults.primary),
            accent: color_or(raw.accent, &defaults.accent),
            gradient,
            font: raw.font.filter(|f| f.trim().is_empty() == false).unwrap_or(defaults.font),
        }
    }
}


/// Everything the dashboard remembers about the way it looks
#[derive(Clone, Debug, PartialEq)]
pub struct Preferences {
    pub theme: ThemeChoice,
    pub custom_theme: CustomTheme,
    pub menu_order: Vec<Page>,
    pub default_page: Page,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::Light,
            custom_theme: CustomTheme::default(),
            menu_order: Page::ALL.to_vec(),
            default_page: Page::Home,
        }
    }
}

impl Preferences {
    pub fn load(storage: &LocalStorage) -> Self {
        let defaults = Self::default();

        let theme = match storage.get(THEME_KEY).map(|s| s.parse::<ThemeChoice>()) {
            None => defaults.theme,
            Some(Ok(theme)) => theme,
            Some(Err(err)) => {
                log::warn!("{}. Using the {} theme", err, defaults.theme);
                defaults.theme
            },
        };

        let custom_theme = storage.get(CUSTOM_THEME_KEY)
            .map(CustomTheme::decode)
            .unwrap_or(defaults.custom_theme);

        let menu_order = match storage.get(MENU_ORDER_KEY) {
            None => defaults.menu_order,
            Some(raw) => match serde_json::from_str::<Vec<String>>(raw) {
                Ok(names) => normalize_menu_order(&names),
                Err(err) => {
                    log::warn!("Invalid menu order ({}). Using the default one", err);
                    defaults.menu_order
                },
            },
        };

        let default_page = match storage.get(DEFAULT_PAGE_KEY).map(|s| s.parse::<Page>()) {
            None => defaults.default_page,
            Some(Ok(page)) => page,
            Some(Err(err)) => {
                log::warn!("{}. Landing on {}", err, defaults.default_page);
                defaults.default_page
            },
        };

        Self { theme, custom_theme, menu_order, default_page }
    }

    /// Write every preference to the storage, stopping at the first one that cannot be persisted
    pub fn store(&self, storage: &mut LocalStorage) -> Result<(), Box<dyn Error>> {
        storage.set(THEME_KEY, self.theme)?;
        storage.set(CUSTOM_THEME_KEY, serde_json::to_string(&self.custom_theme)?)?;
        storage.set(MENU_ORDER_KEY, serde_json::to_string(&self.menu_order)?)?;
        storage.set(DEFAULT_PAGE_KEY, self.default_page)?;
        Ok(())
    }
}

/// Known pages in the stored order, without duplicates, followed by the pages the stored order forgot
pub fn normalize_menu_order(names: &[String]) -> Vec<Page> {
    let mut order = Vec::new();
    for name in names {
        match name.parse::<Page>() {
            Ok(page) if order.contains(&page) == false => order.push(page),
            Ok(_) => continue,
            Err(err) => log::warn!("{} in the menu order. Ignoring it", err),
        }
    }
    for page in Page::ALL.iter() {
        if order.contains(page) == false {
            order.push(*page);
        }
    }
    order
}
