use anyhow::{bail, Result};
use serde::Deserialize;

/// Name reserved for the musical episode catalog, see [`crate::musical`].
pub const MUSICAL: &str = "musical";

/// A named keyword ruleset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Theme {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl Theme {
    fn new(name: &str, keywords: &[&str], exclude: &[&str], description: &str) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
            description: description.to_string(),
        }
    }

    /// Case-insensitive substring match over `"{title} {summary}"`.
    /// Any exclude term rejects the item before keywords are looked at.
    pub fn matches(&self, title: &str, summary: &str) -> bool {
        let combined = format!("{title} {summary}").to_lowercase();
        if self
            .exclude
            .iter()
            .any(|exc| combined.contains(&exc.to_lowercase()))
        {
            return false;
        }
        self.keywords
            .iter()
            .any(|kw| combined.contains(&kw.to_lowercase()))
    }
}

/// What a theme name resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    Keywords(&'a Theme),
    Musical,
}

/// Ordered registry of the themes the CLI knows about.
#[derive(Debug, Clone)]
pub struct ThemeBook {
    themes: Vec<Theme>,
}

impl ThemeBook {
    pub fn builtin() -> Self {
        Self {
            themes: builtin_themes(),
        }
    }

    /// Built-ins followed by `custom`. A custom theme reusing a built-in name
    /// replaces it in place.
    pub fn with_custom(custom: impl IntoIterator<Item = Theme>) -> Self {
        let mut book = Self::builtin();
        for theme in custom {
            if theme.name == MUSICAL {
                warn!("theme name '{MUSICAL}' is reserved, ignoring config entry");
                continue;
            }
            match book.themes.iter_mut().find(|t| t.name == theme.name) {
                Some(existing) => {
                    debug!("config overrides built-in theme {}", theme.name);
                    *existing = theme;
                }
                None => book.themes.push(theme),
            }
        }
        book
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.name == name)
    }

    pub fn resolve(&self, name: &str) -> Result<Selection<'_>> {
        if name == MUSICAL {
            return Ok(Selection::Musical);
        }
        match self.get(name) {
            Some(theme) => Ok(Selection::Keywords(theme)),
            None => bail!(
                "Unknown theme: {name}. Available themes: {}",
                self.names().join(", ")
            ),
        }
    }

    /// Every resolvable name, `musical` last.
    pub fn names(&self) -> Vec<&str> {
        self.themes
            .iter()
            .map(|t| t.name.as_str())
            .chain(std::iter::once(MUSICAL))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }
}

/// `christmas` => `Christmas Episodes`
pub fn default_playlist_name(theme: &str) -> String {
    let mut chars = theme.chars();
    match chars.next() {
        Some(first) => format!("{}{} Episodes", first.to_uppercase(), chars.as_str()),
        None => "Episodes".to_string(),
    }
}

fn builtin_themes() -> Vec<Theme> {
    vec![
        Theme::new(
            "christmas",
            &[
                "christmas",
                "xmas",
                "santa",
                "santa's",
                "scrooge",
                "nutcracker",
                "krampus",
                "yuletide",
                "rudolph",
                "grinch",
                "north pole",
                "christmas eve",
                "christmas tree",
                "jingle",
                "frosty the snowman",
                "mistletoe",
                "eggnog",
            ],
            &[
                "halloween",
                "thanksgiving",
                "easter",
                "valentine",
                "hanukkah",
                "kwanzaa",
                "columbus day",
                "independence day",
                "4th of july",
                "new year",
                "labor day",
                "memorial day",
            ],
            "Christmas and holiday episodes",
        ),
        Theme::new(
            "halloween",
            &[
                "halloween",
                "spooky",
                "haunted",
                "ghost",
                "witch",
                "vampire",
                "zombie",
                "monster",
                "trick or treat",
                "costume",
                "pumpkin",
                "scary",
                "horror",
                "nightmare",
            ],
            &["christmas", "thanksgiving"],
            "Halloween and spooky episodes",
        ),
        Theme::new(
            "thanksgiving",
            &["thanksgiving", "turkey day", "pilgrim", "giving thanks"],
            &["christmas"],
            "Thanksgiving episodes",
        ),
        Theme::new(
            "newyears",
            &[
                "new year",
                "new year's",
                "nye",
                "december 31",
                "january 1",
                "midnight countdown",
                "ball drop",
                "auld lang syne",
            ],
            &["chinese new year", "lunar new year"],
            "New Year's Eve/Day episodes",
        ),
        Theme::new(
            "hanukkah",
            &[
                "hanukkah",
                "chanukah",
                "hanukah",
                "channukah",
                "menorah",
                "dreidel",
                "latkes",
                "maccabee",
                "festival of lights",
                "eight crazy nights",
            ],
            &[],
            "Hanukkah episodes and movies",
        ),
        Theme::new(
            "valentine",
            &[
                "valentine",
                "valentines",
                "valentine's day",
                "cupid",
                "romantic",
                "love day",
            ],
            &[],
            "Valentine's Day episodes",
        ),
        Theme::new(
            "july4th",
            &[
                "4th of july",
                "fourth of july",
                "july fourth",
                "july 4th",
                "independence day",
                "fireworks",
            ],
            &[
                "christmas",
                "halloween",
                "thanksgiving",
                "alien",
                "war of the worlds",
            ],
            "4th of July / Independence Day episodes",
        ),
    ]
}
