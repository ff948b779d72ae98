use serde::Serialize;

/// A single `key=value;` line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

/// A `[NAME] { ... }` block. Names and keys are kept as written; every lookup
/// ignores ASCII case, the same way the engine reads them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub entries: Vec<Entry>,
    pub sections: Vec<Section>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the value for `key`. When a key is repeated the last one wins.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.key.eq_ignore_ascii_case(key))
            .map(|entry| entry.value.as_str())
    }

    /// Returns the first direct child section called `name`.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name.eq_ignore_ascii_case(name))
    }

    /// Resolves a `/`-separated path where every segment but the last names a
    /// child section, e.g. `"PLAYER0/name"`.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let (sections, key) = match path.rsplit_once('/') {
            Some((sections, key)) => (Some(sections), key),
            None => (None, path),
        };

        let mut current = self;
        for name in sections.into_iter().flat_map(|sections| sections.split('/')) {
            current = current.section(name)?;
        }

        current.value(key)
    }

    /// Iterates numbered child sections such as `PLAYER0`, `PLAYER1`, yielding
    /// the parsed index alongside each one. Sections whose suffix is not a
    /// number are skipped.
    pub fn sections_with_prefix<'s>(&'s self, prefix: &'s str) -> impl Iterator<Item = (usize, &'s Section)> + 's {
        self.sections.iter().filter_map(move |section| {
            let name = section.name.as_bytes();

            if name.len() <= prefix.len() || !name[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes()) {
                return None;
            }

            let suffix = &section.name[prefix.len()..];
            if !suffix.bytes().all(|byte| byte.is_ascii_digit()) {
                return None;
            }

            suffix.parse::<usize>().ok().map(|index| (index, section))
        })
    }
}

/// Structured form of a start script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameSpecification {
    /// The text this specification was decoded from.
    pub script: String,

    /// Every top-level section, in file order.
    pub sections: Vec<Section>,

    #[serde(skip)]
    game: usize,
}

impl GameSpecification {
    /// Wraps decoded top-level sections. Returns `None` if there is no `GAME`
    /// section among them.
    pub(crate) fn from_sections(script: String, sections: Vec<Section>) -> Option<Self> {
        let game = sections
            .iter()
            .position(|section| section.name.eq_ignore_ascii_case("GAME"))?;

        Some(Self { script, sections, game })
    }

    /// The `[GAME]` section everything else hangs off.
    pub fn game(&self) -> &Section {
        &self.sections[self.game]
    }

    pub fn map_name(&self) -> Option<&str> {
        self.game().value("mapname")
    }

    pub fn game_type(&self) -> Option<&str> {
        self.game().value("gametype")
    }

    pub fn host_ip(&self) -> Option<&str> {
        self.game().value("hostip")
    }

    pub fn players(&self) -> impl Iterator<Item = (usize, &Section)> {
        self.game().sections_with_prefix("PLAYER")
    }

    pub fn ais(&self) -> impl Iterator<Item = (usize, &Section)> {
        self.game().sections_with_prefix("AI")
    }

    pub fn teams(&self) -> impl Iterator<Item = (usize, &Section)> {
        self.game().sections_with_prefix("TEAM")
    }

    pub fn ally_teams(&self) -> impl Iterator<Item = (usize, &Section)> {
        self.game().sections_with_prefix("ALLYTEAM")
    }
}
