// Terminal Display - declarative terminal layouts, redrawn from event streams
//
// A screen is described as a display tree: bordered leaf boxes (atoms)
// inside border-less containers (lists), placed with percentages of their
// parent. Trees are plain values built with list operations and layout
// combinators, and a renderer puts a whole tree on a terminal at once.
//
// Architecture:
// - display: the tree and its list operations (cons/car/cdr)
// - layout: pure combinators (rows, columns, sizing, indents, inline)
// - render: ratatui-backed sink with whole-tree replacement
// - compose: reactive components + template, driven by an event stream
// - events: stream sources (channels, line readers, seeding)
// - config / logging: ambient setup, kept off the rendered terminal

pub mod compose;
pub mod config;
pub mod display;
pub mod events;
pub mod layout;
pub mod logging;
pub mod render;

pub use compose::{
    component, compose, show, Components, Composer, Reactive, ShowSummary, Shower,
};
pub use config::{Config, LoggingConfig, RenderConfig};
pub use display::{
    atom, atom_from, car, cdr, cons, empty_list, is_atom, is_empty, list, list_from, Atom,
    Display, DisplayError, Field, Geometry, List, Percent,
};
pub use layout::{column, indent, inline, label, row, size_height, size_width, vindent};
pub use render::{RenderSink, Renderer, Screen};
