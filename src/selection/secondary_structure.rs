//! Secondary-structure element kinds that can be shown or hidden.

use std::fmt;
use std::str::FromStr;

/// Secondary structure type addressable by a viewer selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralElement {
    /// Alpha helices.
    Helix,
    /// Beta strands.
    Sheet,
    /// Everything else (coil, turns).
    Loop,
}

impl StructuralElement {
    /// All elements.
    pub const ALL: [Self; 3] = [Self::Helix, Self::Sheet, Self::Loop];

    /// Secondary-structure code used in viewer selectors.
    #[must_use]
    pub fn selector_code(self) -> char {
        match self {
            Self::Helix => 'h',
            Self::Sheet => 's',
            Self::Loop => 'c',
        }
    }

    /// Lower-case name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Helix => "helix",
            Self::Sheet => "sheet",
            Self::Loop => "loop",
        }
    }
}

impl fmt::Display for StructuralElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a kind string names no structural element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownElement(pub String);

impl fmt::Display for UnknownElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown structural element: {:?}", self.0)
    }
}

impl std::error::Error for UnknownElement {}

impl FromStr for StructuralElement {
    type Err = UnknownElement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = s.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(kind))
            .ok_or_else(|| UnknownElement(s.to_owned()))
    }
}
