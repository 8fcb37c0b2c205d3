//! Technology catalog shown by the clients.

/// Label used when a request does not name a technology.
pub const DEFAULT_TECHNOLOGY: &str = "React + Tailwind CSS";

/// One selectable output stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Technology {
    /// Stable identifier, e.g. `"react-tailwind"`.
    pub id: &'static str,
    /// Label substituted into the prompt, e.g. `"React + Tailwind"`.
    pub label: &'static str,
}

pub const CATALOG: &[Technology] = &[
    Technology { id: "html",           label: "HTML" },
    Technology { id: "react-css",      label: "React + CSS" },
    Technology { id: "react-tailwind", label: "React + Tailwind" },
    Technology { id: "vue",            label: "Vue" },
    Technology { id: "angular",        label: "Angular" },
    Technology { id: "svelte",         label: "Svelte" },
    Technology { id: "swiftui",        label: "Swift UI" },
    Technology { id: "next",           label: "Next.js" },
    Technology { id: "react-native",   label: "React Native" },
    Technology { id: "flutter",        label: "Flutter" },
    Technology { id: "kotlin",         label: "Kotlin" },
];

/// Look up a catalog entry by id (case-insensitive).
pub fn find(id: &str) -> Option<&'static Technology> {
    CATALOG.iter().find(|t| t.id.eq_ignore_ascii_case(id))
}

/// Turn a requested technology into the label sent to the model.
///
/// Catalog ids map to their label; any other non-blank string is taken as a
/// free-form label. Absent or blank input yields [`DEFAULT_TECHNOLOGY`].
pub fn resolve(requested: Option<&str>) -> String {
    match requested.map(str::trim) {
        None | Some("") => DEFAULT_TECHNOLOGY.to_owned(),
        Some(value) => find(value)
            .map(|t| t.label.to_owned())
            .unwrap_or_else(|| value.to_owned()),
    }
}
