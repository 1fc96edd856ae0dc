//! String Interner - Deduplicate tag names
//!
//! Tag identity is compared constantly while walking ancestors and counting
//! same-tag siblings, so every tag name is stored once (lowercased) and
//! compared as a 4-byte id.

use std::collections::HashMap;

/// Interned string ID - just 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// Empty string
    pub const EMPTY: InternedString = InternedString(0);
}

/// String interner for tag names
#[derive(Debug, Clone)]
pub struct StringInterner {
    strings: Vec<Box<str>>,
    map: HashMap<Box<str>, u32>,
}

impl StringInterner {
    /// Create a new interner with common HTML tag names pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::with_capacity(64),
            map: HashMap::with_capacity(64),
        };

        interner.intern("");

        const COMMON_TAGS: &[&str] = &[
            "html", "head", "body", "div", "span", "p", "a", "img",
            "ul", "ol", "li", "table", "tr", "td", "th", "thead", "tbody",
            "form", "input", "button", "select", "option", "textarea",
            "h1", "h2", "h3", "h4", "h5", "h6",
            "header", "footer", "nav", "main", "section", "article", "aside",
            "script", "style", "link", "meta", "title", "iframe",
        ];

        for tag in COMMON_TAGS {
            interner.intern(tag);
        }

        interner
    }

    /// Intern a tag name. Names are ASCII-lowercased first, so `LI` and `li`
    /// share one id.
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(id) = self.lookup(s) {
            return id;
        }

        let owned: Box<str> = s.to_ascii_lowercase().into();
        let id = self.strings.len() as u32;
        self.strings.push(owned.clone());
        self.map.insert(owned, id);
        InternedString(id)
    }

    /// Look up a name without interning it
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        if s.bytes().any(|b| b.is_ascii_uppercase()) {
            self.map.get(s.to_ascii_lowercase().as_str())
        } else {
            self.map.get(s)
        }
        .map(|&id| InternedString(id))
    }

    /// Get the string for an interned ID
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        self.strings.get(id.0 as usize).map(|s| &**s).unwrap_or("")
    }

    /// Number of interned strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
