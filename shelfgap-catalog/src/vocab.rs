//! Canonical platform vocabulary.
//!
//! Platform tokens in franchise lists are wildly inconsistent ("PS2",
//! "PlayStation 2", "Playstation2"). The vocabulary maps aliases to one
//! canonical tag per platform. A built-in table covers the common consoles;
//! additional definitions load from a directory of YAML files, one
//! [`PlatformDef`] per file.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
}

/// A platform definition: canonical tag, display name, and aliases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformDef {
    /// Canonical tag stored on entries (e.g., "PS2", "NES").
    pub tag: String,
    pub display_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Alias-to-tag lookup table over a set of platform definitions.
#[derive(Debug, Clone)]
pub struct PlatformVocab {
    defs: Vec<PlatformDef>,
    /// Lowercased alias (and tag) → index into `defs`.
    by_alias: HashMap<String, usize>,
}

impl PlatformVocab {
    /// Build a vocabulary from explicit definitions.
    pub fn new(defs: Vec<PlatformDef>) -> Self {
        let mut by_alias = HashMap::new();
        for (i, def) in defs.iter().enumerate() {
            by_alias.insert(fold(&def.tag), i);
            for alias in &def.aliases {
                by_alias.insert(fold(alias), i);
            }
        }
        Self { defs, by_alias }
    }

    /// The built-in vocabulary of common platforms.
    pub fn builtin() -> Self {
        Self::new(builtin_defs())
    }

    /// Built-in vocabulary extended by YAML definitions from `dir`.
    ///
    /// Later definitions win on alias collisions, so a YAML file can
    /// re-point an alias or add a new platform outright.
    pub fn with_overrides(dir: &Path) -> Result<Self, VocabError> {
        let mut defs = builtin_defs();
        defs.extend(load_defs(dir)?);
        Ok(Self::new(defs))
    }

    /// Canonicalize one platform token.
    ///
    /// Known aliases map to their canonical tag; unknown tokens pass through
    /// trimmed, preserving whatever the source list said.
    pub fn canonical(&self, token: &str) -> String {
        let trimmed = token.trim();
        match self.by_alias.get(&fold(trimmed)) {
            Some(&i) => self.defs[i].tag.clone(),
            None => trimmed.to_string(),
        }
    }

    /// Canonicalize a token list, dropping duplicates while keeping order.
    pub fn canonical_set(&self, tokens: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let tag = self.canonical(token);
            if !tag.is_empty() && !out.contains(&tag) {
                out.push(tag);
            }
        }
        out
    }

    /// Display name for a canonical tag, when the tag is known.
    pub fn display_name(&self, tag: &str) -> Option<&str> {
        self.by_alias
            .get(&fold(tag))
            .map(|&i| self.defs[i].display_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Case-insensitive key form for alias lookup. Strips internal whitespace
/// and hyphens so "Play Station 2" and "playstation-2" both resolve.
fn fold(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Load platform definitions from YAML files in a directory.
///
/// Each `.yaml`/`.yml` file contains a single `PlatformDef`. A missing
/// directory is treated as empty.
pub fn load_defs(dir: &Path) -> Result<Vec<PlatformDef>, VocabError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(VocabError::DirNotFound(dir.display().to_string()));
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| VocabError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut defs = Vec::new();
    for entry in entries {
        let path = entry.path();
        let contents = std::fs::read_to_string(&path).map_err(|e| VocabError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let def: PlatformDef = serde_yml::from_str(&contents).map_err(|e| VocabError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        defs.push(def);
    }

    Ok(defs)
}

/// The built-in platform table.
fn builtin_defs() -> Vec<PlatformDef> {
    fn def(tag: &str, display: &str, aliases: &[&str]) -> PlatformDef {
        PlatformDef {
            tag: tag.to_string(),
            display_name: display.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    vec![
        def("NES", "Nintendo Entertainment System", &["Nintendo Entertainment System", "Famicom"]),
        def(
            "SNES",
            "Super Nintendo Entertainment System",
            &["Super Nintendo", "Super Nintendo Entertainment System", "Super Famicom", "Super NES"],
        ),
        def("N64", "Nintendo 64", &["Nintendo 64"]),
        def("GameCube", "Nintendo GameCube", &["Nintendo GameCube", "NGC", "GCN", "GC"]),
        def("Wii", "Nintendo Wii", &["Nintendo Wii"]),
        def("Wii U", "Nintendo Wii U", &["Nintendo Wii U", "WiiU"]),
        def("Switch", "Nintendo Switch", &["Nintendo Switch", "NSW", "Switch 2", "Nintendo Switch 2"]),
        def("GB", "Game Boy", &["Game Boy", "Gameboy"]),
        def("GBC", "Game Boy Color", &["Game Boy Color", "Gameboy Color"]),
        def("GBA", "Game Boy Advance", &["Game Boy Advance", "Gameboy Advance"]),
        def("DS", "Nintendo DS", &["Nintendo DS", "NDS"]),
        def("3DS", "Nintendo 3DS", &["Nintendo 3DS", "N3DS"]),
        def("Virtual Boy", "Virtual Boy", &[]),
        def("PS1", "PlayStation", &["PlayStation", "PSX", "PSOne", "PS One"]),
        def("PS2", "PlayStation 2", &["PlayStation 2", "Playstation2"]),
        def("PS3", "PlayStation 3", &["PlayStation 3"]),
        def("PS4", "PlayStation 4", &["PlayStation 4"]),
        def("PS5", "PlayStation 5", &["PlayStation 5"]),
        def("PSP", "PlayStation Portable", &["PlayStation Portable"]),
        def("Vita", "PlayStation Vita", &["PS Vita", "PlayStation Vita", "PSVita"]),
        def("Xbox", "Xbox", &["Microsoft Xbox", "OG Xbox"]),
        def("Xbox 360", "Xbox 360", &["X360", "Xbox360"]),
        def("Xbox One", "Xbox One", &["XB1", "XBone", "XOne"]),
        def(
            "Xbox Series X/S",
            "Xbox Series X/S",
            &["Xbox Series X", "Xbox Series S", "Xbox Series X|S", "XSX"],
        ),
        def("Genesis", "Sega Genesis", &["Sega Genesis", "Mega Drive", "Sega Mega Drive"]),
        def("Master System", "Sega Master System", &["Sega Master System", "SMS"]),
        def("Game Gear", "Sega Game Gear", &["Sega Game Gear", "GG"]),
        def("Saturn", "Sega Saturn", &["Sega Saturn"]),
        def("Dreamcast", "Sega Dreamcast", &["Sega Dreamcast", "DC"]),
        def("Sega CD", "Sega CD", &["Mega CD", "Mega-CD"]),
        def("32X", "Sega 32X", &["Sega 32X"]),
        def("PC", "PC", &["Windows", "Microsoft Windows", "Steam", "MS-DOS", "DOS", "Win"]),
        def("Mac", "Mac", &["macOS", "OS X", "Macintosh"]),
        def("Linux", "Linux", &[]),
        def("iOS", "iOS", &["iPhone", "iPad", "Apple iOS"]),
        def("Android", "Android", &["Google Android"]),
        def("Arcade", "Arcade", &["Coin-op"]),
        def("Atari 2600", "Atari 2600", &["VCS", "Atari VCS"]),
        def("Stadia", "Google Stadia", &["Google Stadia"]),
    ]
}
