use std::path::Path;

/// Visual mode for rendered output. Persisted client-side as a single
/// string and applied on every run; light is the default when nothing has
/// been stored yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than "dark" resolves to light.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("dark") {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Browser-chrome meta color associated with the mode.
    pub fn meta_color(self) -> &'static str {
        match self {
            Self::Light => "#f4f7f6",
            Self::Dark => "#1a1a2e",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Accent colors handed explicitly to every render function, so no render
/// path reaches for shared mutable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub theme: Theme,
    pub meta_color: &'static str,
    pub success: &'static str,
    pub danger: &'static str,
    pub info: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                theme,
                meta_color: theme.meta_color(),
                success: "#28a745",
                danger: "#dc3545",
                info: "#0d6efd",
            },
            Theme::Dark => Self {
                theme,
                meta_color: theme.meta_color(),
                success: "#34d058",
                danger: "#ff6b6b",
                info: "#58a6ff",
            },
        }
    }
}

pub fn load(store: &Path) -> Theme {
    match std::fs::read_to_string(store) {
        Ok(contents) => Theme::parse(&contents),
        Err(_) => Theme::Light,
    }
}

pub fn store(store: &Path, theme: Theme) -> Result<(), String> {
    if let Some(parent) = store.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "failed to create theme directory '{}': {e}",
                parent.display()
            )
        })?;
    }
    std::fs::write(store, theme.as_str())
        .map_err(|e| format!("failed to write theme '{}': {e}", store.display()))
}

/// Flips the persisted mode and returns the newly active one.
pub fn toggle(store_path: &Path) -> Result<Theme, String> {
    let next = load(store_path).flipped();
    store(store_path, next)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_store(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("oncoview-{}-{}", name, std::process::id()))
    }

    #[test]
    fn parse_defaults_to_light() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("DARK"), Theme::Dark);
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("solarized"), Theme::Light);
        assert_eq!(Theme::parse(""), Theme::Light);
    }

    #[test]
    fn meta_colors_track_the_mode() {
        assert_eq!(Theme::Light.meta_color(), "#f4f7f6");
        assert_eq!(Theme::Dark.meta_color(), "#1a1a2e");
        assert_eq!(Palette::for_theme(Theme::Dark).meta_color, "#1a1a2e");
    }

    #[test]
    fn apply_then_read_back_round_trips() {
        let path = scratch_store("roundtrip");
        for theme in [Theme::Light, Theme::Dark] {
            store(&path, theme).unwrap();
            assert_eq!(load(&path), theme);
        }
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn toggle_twice_is_identity() {
        let path = scratch_store("toggle");
        store(&path, Theme::Light).unwrap();
        let first = toggle(&path).unwrap();
        assert_eq!(first, Theme::Dark);
        let second = toggle(&path).unwrap();
        assert_eq!(second, Theme::Light);
        assert_eq!(load(&path), Theme::Light);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_store_defaults_to_light() {
        let path = scratch_store("missing-never-written");
        let _ = std::fs::remove_file(&path);
        assert_eq!(load(&path), Theme::Light);
    }
}
