//! Display tree - the value a screen is built from
//!
//! A display is either an atom (a bordered leaf box with text) or a list
//! (a border-less container of displays). Trees are immutable values:
//! every operation here returns a new tree and leaves its input alone.
//!
//! # List order
//!
//! Children are stored in insertion order, which is also the paint order.
//! The head of the list is the child appended last, so `cons` is an append
//! and `car`/`cdr` look at the end of the vector:
//!
//! ```text
//! cons(a, cons(b, cons(c, empty_list())))
//!
//! children:  [c, b, a]     painted left to right, `a` on top
//! head:                a
//! ```

mod error;
mod percent;

pub use error::{DisplayError, Kind};
pub use percent::{Percent, PercentParseError};

/// Position and size relative to the parent, each independently optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub width: Option<Percent>,
    pub height: Option<Percent>,
    pub left: Option<Percent>,
    pub top: Option<Percent>,
}

impl Geometry {
    /// Whole parent, no offset
    pub const fn full() -> Self {
        Self {
            width: Some(Percent::FULL),
            height: Some(Percent::FULL),
            left: None,
            top: None,
        }
    }

    /// Store a geometry field. Returns the field back if it is not geometry.
    fn set(&mut self, field: Field) -> Option<Field> {
        match field {
            Field::Width(v) => self.width = v,
            Field::Height(v) => self.height = v,
            Field::Left(v) => self.left = v,
            Field::Top(v) => self.top = v,
            other => return Some(other),
        }
        None
    }

    fn fields(&self) -> [Field; 4] {
        [
            Field::Width(self.width),
            Field::Height(self.height),
            Field::Left(self.left),
            Field::Top(self.top),
        ]
    }
}

/// One named field of a display, as seen by [`Display::copy_with`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Content(String),
    Label(Option<String>),
    Width(Option<Percent>),
    Height(Option<Percent>),
    Left(Option<Percent>),
    Top(Option<Percent>),
}

/// Bordered leaf box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    content: String,
    label: Option<String>,
    geometry: Geometry,
}

impl Atom {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            label: None,
            geometry: Geometry::default(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Copy every field through `transform`
    pub fn copy_with(&self, mut transform: impl FnMut(Field) -> Field) -> Atom {
        let mut copy = Atom::new(String::new());
        let fields = std::iter::once(Field::Content(self.content.clone()))
            .chain(self.geometry.fields())
            .chain(std::iter::once(Field::Label(self.label.clone())));

        for field in fields {
            match copy.geometry.set(transform(field)) {
                Some(Field::Content(content)) => copy.content = content,
                Some(Field::Label(label)) => copy.label = label,
                _ => {}
            }
        }
        copy
    }
}

/// Border-less container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    geometry: Geometry,
    children: Vec<Display>,
}

impl List {
    /// No children, sized to the whole parent
    pub fn empty() -> Self {
        Self::with_geometry(Geometry::full())
    }

    pub(crate) fn with_geometry(geometry: Geometry) -> Self {
        Self {
            geometry,
            children: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Children in paint order (the head is last)
    pub fn children(&self) -> &[Display] {
        &self.children
    }

    /// Children head first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Display> + ExactSizeIterator {
        self.children.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn head(&self) -> Option<&Display> {
        self.children.last()
    }

    /// New list with `display` as its head
    pub fn cons(&self, display: Display) -> List {
        let mut list = self.clone();
        list.children.push(display);
        list
    }

    /// New list without the head, same geometry
    pub fn tail(&self) -> Option<List> {
        let (_, rest) = self.children.split_last()?;
        Some(List {
            geometry: self.geometry,
            children: rest.to_vec(),
        })
    }

    /// Copy the geometry fields through `transform`, children unchanged.
    /// Content and label have no meaning on a list and are dropped.
    pub fn copy_with(&self, mut transform: impl FnMut(Field) -> Field) -> List {
        let mut geometry = Geometry::default();
        for field in self.geometry.fields() {
            if let Some(dropped) = geometry.set(transform(field)) {
                tracing::debug!(?dropped, "ignoring non-geometry field on a list copy");
            }
        }
        List {
            geometry,
            children: self.children.clone(),
        }
    }
}

impl Default for List {
    fn default() -> Self {
        Self::empty()
    }
}

/// Build a list whose head is the first item
impl FromIterator<Display> for List {
    fn from_iter<I: IntoIterator<Item = Display>>(iter: I) -> Self {
        let mut children: Vec<Display> = iter.into_iter().collect();
        children.reverse();
        List {
            geometry: Geometry::full(),
            children,
        }
    }
}

/// A screen layout: a leaf or a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Display {
    Atom(Atom),
    List(List),
}

impl Display {
    pub fn kind(&self) -> Kind {
        match self {
            Display::Atom(_) => Kind::Atom,
            Display::List(_) => Kind::List,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Display::Atom(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Display::List(_))
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Display::Atom(atom) => Some(atom),
            Display::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Display::List(list) => Some(list),
            Display::Atom(_) => None,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        match self {
            Display::Atom(atom) => atom.geometry(),
            Display::List(list) => list.geometry(),
        }
    }

    /// Structural copy with `transform` applied to each field of this node.
    /// Children of a list are copied as they are.
    pub fn copy_with(&self, transform: impl FnMut(Field) -> Field) -> Display {
        match self {
            Display::Atom(atom) => Display::Atom(atom.copy_with(transform)),
            Display::List(list) => Display::List(list.copy_with(transform)),
        }
    }

    pub(crate) fn expect_list(&self, operation: &'static str) -> Result<&List, DisplayError> {
        self.as_list()
            .ok_or(DisplayError::type_error(operation, Kind::Atom))
    }

    pub(crate) fn expect_atom(&self, operation: &'static str) -> Result<&Atom, DisplayError> {
        self.as_atom()
            .ok_or(DisplayError::type_error(operation, Kind::List))
    }
}

impl From<Atom> for Display {
    fn from(atom: Atom) -> Self {
        Display::Atom(atom)
    }
}

impl From<List> for Display {
    fn from(list: List) -> Self {
        Display::List(list)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// List processing
// ─────────────────────────────────────────────────────────────────────────────

/// A list with no children covering the whole parent
pub fn empty_list() -> Display {
    Display::List(List::empty())
}

/// A bordered box showing `content`, with no geometry set
pub fn atom(content: impl Into<String>) -> Display {
    Display::Atom(Atom::new(content))
}

/// A list holding `items`, the first item being the head
pub fn list(items: impl IntoIterator<Item = Display>) -> Display {
    Display::List(items.into_iter().collect())
}

pub fn is_atom(display: &Display) -> bool {
    display.is_atom()
}

/// True for a list with no children. Atoms are never empty.
pub fn is_empty(display: &Display) -> bool {
    display.as_list().is_some_and(List::is_empty)
}

/// Prepend `display` to `list`
pub fn cons(display: &Display, list: &Display) -> Result<Display, DisplayError> {
    let list = list.expect_list("cons onto")?;
    Ok(Display::List(list.cons(display.clone())))
}

/// Copy of the head of `list`
pub fn car(list: &Display) -> Result<Display, DisplayError> {
    list.expect_list("take the car of")?
        .head()
        .cloned()
        .ok_or(DisplayError::EmptyList { operation: "car" })
}

/// `list` without its head
pub fn cdr(list: &Display) -> Result<Display, DisplayError> {
    list.expect_list("take the cdr of")?
        .tail()
        .map(Display::List)
        .ok_or(DisplayError::EmptyList { operation: "cdr" })
}

/// Copy an atom through `transform`; fails on a list
pub fn atom_from(
    other: &Display,
    transform: impl FnMut(Field) -> Field,
) -> Result<Display, DisplayError> {
    let atom = other.expect_atom("create an atom by copying")?;
    Ok(Display::Atom(atom.copy_with(transform)))
}

/// Copy a list through `transform`; fails on an atom
pub fn list_from(
    other: &Display,
    transform: impl FnMut(Field) -> Field,
) -> Result<Display, DisplayError> {
    let list = other.expect_list("create a list by copying")?;
    Ok(Display::List(list.copy_with(transform)))
}
