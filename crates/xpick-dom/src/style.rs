//! Inline style surface
//!
//! Declarations from the `style` attribute plus anything written at runtime
//! (highlights). Order of first insertion is kept so serialization is stable.

/// Inline style declarations of one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(Box<str>, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute value (`prop: value; prop: value`)
    pub fn parse(style: &str) -> Self {
        let mut parsed = Self::new();
        for decl in style.split(';') {
            let decl = decl.trim();
            if decl.is_empty() {
                continue;
            }

            let mut parts = decl.splitn(2, ':');
            let (Some(name), Some(value)) = (parts.next(), parts.next()) else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim());
            if name.is_empty() || value.is_empty() {
                continue;
            }

            parsed.set(name, value);
        }
        parsed
    }

    /// Get a declared value
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value.as_str())
    }

    /// Set a property. An empty value removes the declaration, matching
    /// `element.style.prop = ""` in browsers.
    pub fn set(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.remove(property);
            return;
        }

        let property = property.to_ascii_lowercase();
        match self.declarations.iter_mut().find(|(name, _)| **name == *property) {
            Some((_, existing)) => {
                existing.clear();
                existing.push_str(value);
            }
            None => self.declarations.push((property.into(), value.to_string())),
        }
    }

    /// Remove a property, returning the old value
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let pos = self
            .declarations
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(property))?;
        Some(self.declarations.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations.iter().map(|(n, v)| (&**n, v.as_str()))
    }

    /// Serialize back to attribute form
    pub fn to_css_text(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// CSS initial value of a property, as a computed style reports it for an
/// element that has no declaration of its own.
pub fn initial_value(property: &str) -> &'static str {
    match property.to_ascii_lowercase().as_str() {
        "background-color" => "rgba(0, 0, 0, 0)",
        "box-shadow" => "none",
        "transition" => "all 0s ease 0s",
        "display" => "inline",
        "color" => "rgb(0, 0, 0)",
        _ => "",
    }
}
