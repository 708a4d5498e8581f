use std::collections::BTreeMap;

/// Shows where every episode is a musical.
const SERIES: &[&str] = &[
    "Zoey's Extraordinary Playlist",
    "Crazy Ex-Girlfriend",
    "Flight of the Conchords",
    "Galavant",
    "Smash",
    "Glee",
    "Schmigadoon!",
    "High School Musical: The Musical: The Series",
    "Julie and the Phantoms",
    "Katy Keene",
];

/// Musical episodes of otherwise non-musical shows, matched by episode title.
const EPISODES: &[(&str, &[&str])] = &[
    ("Buffy the Vampire Slayer", &["Once More, with Feeling"]),
    ("Scrubs", &["My Musical"]),
    ("Community", &["Regional Holiday Music"]),
    ("Psych", &["Psych: The Musical", "The Musical"]),
    ("Grey's Anatomy", &["Song Beneath the Song"]),
    ("The Flash", &["Duet"]),
    ("Lucifer", &["Bloody Celestial Karaoke Jam"]),
    (
        "It's Always Sunny in Philadelphia",
        &["The Nightman Cometh", "The Gang Turns Black"],
    ),
    ("How I Met Your Mother", &["Girls Versus Suits", "Girls vs. Suits"]),
    ("That '70s Show", &["That '70s Musical"]),
    ("Fringe", &["Brown Betty"]),
    ("Batman: The Brave and the Bold", &["Mayhem of the Music Meister"]),
    ("The Simpsons", &["All Singing, All Dancing"]),
    ("South Park", &["Elementary School Musical"]),
    (
        "Bob's Burgers",
        &["Work Hard or Die Trying", "Glued, Where's My Bob"],
    ),
    ("Xena: Warrior Princess", &["The Bitter Suite", "Lyre, Lyre"]),
    (
        "Riverdale",
        &["A Night to Remember", "Wicked Little Town", "Next to Normal"],
    ),
    ("Even Stevens", &["Influenza: The Musical"]),
    ("7th Heaven", &["Red Socks"]),
    ("Daria", &["Daria!"]),
    ("Lexx", &["Brigadoom"]),
    ("The Drew Carey Show", &["Drew and Kate's Duet"]),
    ("Hercules: The Legendary Journeys", &["...And Fancy Free"]),
    ("Oz", &["Variety"]),
    ("Once Upon a Time", &["The Song in Your Heart"]),
    ("The Magicians", &["All That Josh", "A Life in the Day"]),
    ("Supergirl", &["Duet"]),
    ("Legacies", &["Salvatore: The Musical!"]),
    ("Supernatural", &["Fan Fiction"]),
    ("Chicago Hope", &["Brain Salad Surgery"]),
];

/// Which shows and episodes count as musicals. Show titles match exactly.
#[derive(Debug, Clone)]
pub struct MusicalCatalog {
    series: Vec<String>,
    episodes: BTreeMap<String, Vec<String>>,
}

impl MusicalCatalog {
    pub fn builtin() -> Self {
        Self {
            series: SERIES.iter().map(|s| s.to_string()).collect(),
            episodes: EPISODES
                .iter()
                .map(|(show, titles)| {
                    (
                        show.to_string(),
                        titles.iter().map(|t| t.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Merge additions from the config file. Episode titles for a show that is
    /// already listed are appended to its targets.
    pub fn extend(
        &mut self,
        series: impl IntoIterator<Item = String>,
        episodes: impl IntoIterator<Item = (String, Vec<String>)>,
    ) {
        for show in series {
            if !self.series.contains(&show) {
                self.series.push(show);
            }
        }
        for (show, titles) in episodes {
            let targets = self.episodes.entry(show).or_default();
            for title in titles {
                if !targets.contains(&title) {
                    targets.push(title);
                }
            }
        }
    }

    pub fn is_musical_series(&self, show_title: &str) -> bool {
        self.series.iter().any(|s| s == show_title)
    }

    pub fn targets(&self, show_title: &str) -> Option<&[String]> {
        self.episodes.get(show_title).map(Vec::as_slice)
    }
}

pub fn matches_episode(targets: &[String], episode_title: &str) -> bool {
    let title = episode_title.to_lowercase();
    targets.iter().any(|t| title.contains(&t.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_match_exactly() {
        let catalog = MusicalCatalog::builtin();
        assert!(catalog.is_musical_series("Glee"));
        assert!(!catalog.is_musical_series("glee"));
        assert!(!catalog.is_musical_series("Glee Project"));
    }

    #[test]
    fn episode_targets() {
        let catalog = MusicalCatalog::builtin();
        let buffy = catalog.targets("Buffy the Vampire Slayer").unwrap();
        assert!(matches_episode(buffy, "Once More, With Feeling"));
        assert!(!matches_episode(buffy, "Hush"));

        let psych = catalog.targets("Psych").unwrap();
        assert!(matches_episode(psych, "Psych: The Musical (Part 1)"));
        assert!(catalog.targets("Seinfeld").is_none());
    }

    #[test]
    fn extend_merges_without_duplicates() {
        let mut catalog = MusicalCatalog::builtin();
        catalog.extend(
            vec!["Glee".to_string(), "Encore!".to_string()],
            vec![
                ("Scrubs".to_string(), vec!["My Musical".to_string(), "My Rah".to_string()]),
                ("Futurama".to_string(), vec!["The Devil's Hands Are Idle Playthings".to_string()]),
            ],
        );
        assert!(catalog.is_musical_series("Encore!"));
        assert_eq!(catalog.series.iter().filter(|s| *s == "Glee").count(), 1);
        assert_eq!(catalog.targets("Scrubs").unwrap(), ["My Musical", "My Rah"]);
        assert!(catalog.targets("Futurama").is_some());
    }
}
