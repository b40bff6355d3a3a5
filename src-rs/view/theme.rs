use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn icon_class(&self) -> &'static str {
        match self {
            Theme::Light => "fa-moon-o",
            Theme::Dark => "fa-sun-o",
        }
    }

    pub fn body_classes(&self) -> &'static [&'static str] {
        match self {
            Theme::Light => &["bg-gray-50", "text-dark"],
            Theme::Dark => &["bg-gray-800", "text-white"],
        }
    }

    /// Classes the toggle removes from the body when entering this theme.
    pub fn replaced_classes(&self) -> &'static [&'static str] {
        self.toggled().body_classes()
    }

    pub fn transition_message(&self) -> &'static str {
        match self {
            Theme::Light => "Switched to light mode",
            Theme::Dark => "Switched to dark mode",
        }
    }
}
