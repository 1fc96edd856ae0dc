//! Path expressions
//!
//! The subset of XPath location paths the picker emits and reads back:
//! child (`/`) and descendant (`//`) steps, tag or `*` name tests and a
//! 1-based positional predicate.

use std::fmt;
use std::str::FromStr;

use xpick_dom::{DomTree, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Child,
    /// `//`: any depth below the context
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTest {
    /// Lowercased tag name
    Tag(String),
    /// `*`
    Any,
}

impl NodeTest {
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        match self {
            NodeTest::Any => tree.is_element(id),
            NodeTest::Tag(tag) => tree.tag_name(id) == Some(tag.as_str()),
        }
    }
}

/// One `tag[index]` segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub axis: Axis,
    pub test: NodeTest,
    /// 1-based position among the matching children of one parent
    pub index: Option<usize>,
}

impl Step {
    /// Child step for a tag, with an optional index
    pub fn child(tag: &str, index: Option<usize>) -> Self {
        Self {
            axis: Axis::Child,
            test: NodeTest::Tag(tag.to_ascii_lowercase()),
            index,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.test {
            NodeTest::Tag(tag) => f.write_str(tag)?,
            NodeTest::Any => f.write_str("*")?,
        }
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

/// A location path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    absolute: bool,
    steps: Vec<Step>,
}

impl PathExpr {
    /// Path evaluated from the document node
    pub fn absolute(steps: Vec<Step>) -> Self {
        Self { absolute: true, steps }
    }

    /// Path evaluated from a context element
    pub fn relative(steps: Vec<Step>) -> Self {
        Self { absolute: false, steps }
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append a relative path to this one, e.g. the absolute path of a list
    /// followed by the bounded path of its rows.
    pub fn join(&self, relative: &PathExpr) -> PathExpr {
        let mut steps = self.steps.clone();
        steps.extend(relative.steps.iter().cloned());
        PathExpr { absolute: self.absolute, steps }
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str(if self.absolute { "/" } else { "." });
        }
        for (i, step) in self.steps.iter().enumerate() {
            let separator = match (step.axis, i == 0, self.absolute) {
                (Axis::Child, true, false) => "",
                (Axis::Descendant, true, false) => ".//",
                (Axis::Child, _, _) => "/",
                (Axis::Descendant, _, _) => "//",
            };
            write!(f, "{separator}{step}")?;
        }
        Ok(())
    }
}

/// Path expression parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathParseError {
    #[error("Empty path expression")]
    Empty,

    #[error("Expected a tag name at offset {0}")]
    ExpectedName(usize),

    #[error("Invalid index at offset {0}: indices start at 1")]
    InvalidIndex(usize),

    #[error("Unexpected character '{ch}' at offset {pos}")]
    Unexpected { ch: char, pos: usize },
}

impl FromStr for PathExpr {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        match input {
            "" => return Err(PathParseError::Empty),
            "." => return Ok(PathExpr::relative(Vec::new())),
            "/" => return Ok(PathExpr::absolute(Vec::new())),
            _ => {}
        }

        let mut parser = Parser { input, pos: 0 };
        let (absolute, mut axis) = if parser.eat("//") {
            (true, Axis::Descendant)
        } else if parser.eat("/") {
            (true, Axis::Child)
        } else if parser.eat(".//") {
            (false, Axis::Descendant)
        } else {
            parser.eat("./");
            (false, Axis::Child)
        };

        let mut steps = Vec::new();
        loop {
            let test = parser.name_test()?;
            let index = parser.predicate()?;
            steps.push(Step { axis, test, index });

            if parser.at_end() {
                break;
            }
            axis = if parser.eat("//") {
                Axis::Descendant
            } else if parser.eat("/") {
                Axis::Child
            } else {
                return Err(parser.unexpected());
            };
        }

        Ok(PathExpr { absolute, steps })
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn unexpected(&self) -> PathParseError {
        match self.rest().chars().next() {
            Some(ch) => PathParseError::Unexpected { ch, pos: self.pos },
            None => PathParseError::ExpectedName(self.pos),
        }
    }

    /// Tag names run up to the next `/`, `[`, `]` or whitespace, so any name
    /// the HTML tokenizer produced reads back. A lone `*` is the wildcard.
    fn name_test(&mut self) -> Result<NodeTest, PathParseError> {
        let len = self
            .rest()
            .find(|c: char| matches!(c, '/' | '[' | ']') || c.is_whitespace())
            .unwrap_or(self.rest().len());
        if len == 0 {
            return Err(PathParseError::ExpectedName(self.pos));
        }
        let name = &self.rest()[..len];
        let test = if name == "*" {
            NodeTest::Any
        } else {
            NodeTest::Tag(name.to_ascii_lowercase())
        };
        self.pos += len;
        Ok(test)
    }

    fn predicate(&mut self) -> Result<Option<usize>, PathParseError> {
        if !self.eat("[") {
            return Ok(None);
        }
        let start = self.pos;
        let len = self.rest().find(']').ok_or(PathParseError::InvalidIndex(start))?;
        let index = self.rest()[..len]
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&i| i >= 1)
            .ok_or(PathParseError::InvalidIndex(start))?;
        self.pos += len + 1;
        Ok(Some(index))
    }
}
