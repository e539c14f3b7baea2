//! Layout combinators
//!
//! Pure functions from displays to new displays. Percentages are of the
//! parent's extent (the screen for the root, the enclosing list otherwise).

use crate::display::{Display, DisplayError, Field, Geometry, Kind, List, Percent};

/// Empty list spanning the parent's width, `height` percent tall
pub fn row(height: u16) -> Display {
    Display::List(List::with_geometry(Geometry {
        height: Some(Percent::new(height)),
        ..Geometry::full()
    }))
}

/// Empty list spanning the parent's height, `width` percent wide
pub fn column(width: u16) -> Display {
    Display::List(List::with_geometry(Geometry {
        width: Some(Percent::new(width)),
        ..Geometry::full()
    }))
}

/// Offset `display` from the parent's left edge.
/// On a list only the list itself moves; its children keep their geometry.
pub fn indent(offset: u16, display: &Display) -> Display {
    display.copy_with(set(Field::Left(Some(Percent::new(offset)))))
}

/// Offset `display` from the parent's top edge
pub fn vindent(offset: u16, display: &Display) -> Display {
    display.copy_with(set(Field::Top(Some(Percent::new(offset)))))
}

pub fn size_width(size: u16, atom: &Display) -> Result<Display, DisplayError> {
    let atom = atom.expect_atom("size the width of")?;
    Ok(Display::Atom(
        atom.copy_with(set(Field::Width(Some(Percent::new(size))))),
    ))
}

pub fn size_height(size: u16, atom: &Display) -> Result<Display, DisplayError> {
    let atom = atom.expect_atom("size the height of")?;
    Ok(Display::Atom(
        atom.copy_with(set(Field::Height(Some(Percent::new(size))))),
    ))
}

/// Title an atom
pub fn label(atom: &Display, title: impl Into<String>) -> Result<Display, DisplayError> {
    let atom = atom.expect_atom("label")?;
    Ok(Display::Atom(atom.copy_with(set(Field::Label(Some(title.into()))))))
}

/// Pack a list of sized atoms left to right with no gaps.
///
/// Each atom's left offset becomes the sum of the widths before it, head
/// first. Widths are not checked against 100%: an over-full row overflows
/// and an under-full one leaves space on the right.
pub fn inline(atoms: &Display) -> Result<Display, DisplayError> {
    let list = match atoms {
        Display::List(list) => list,
        Display::Atom(_) => {
            return Err(DisplayError::layout(format!(
                "expected a list of atoms, got {}",
                Kind::Atom
            )))
        }
    };

    let mut packed = Vec::with_capacity(list.len());
    let mut offset: u16 = 0;
    for (position, child) in list.iter().enumerate() {
        let atom = child.as_atom().ok_or_else(|| {
            DisplayError::layout(format!("child {position} is {}", child.kind()))
        })?;
        let width = atom.geometry().width.ok_or_else(|| {
            DisplayError::layout(format!("child {position} has no width"))
        })?;

        packed.push(Display::Atom(
            atom.copy_with(set(Field::Left(Some(Percent::new(offset))))),
        ));
        offset = offset.saturating_add(width.value());
    }

    if offset > Percent::FULL.value() {
        tracing::debug!(total = offset, "inlined widths exceed the parent");
    }

    // `packed` is head first; a list stores its head last
    let mut inlined = List::with_geometry(*list.geometry());
    for display in packed.into_iter().rev() {
        inlined = inlined.cons(display);
    }
    Ok(Display::List(inlined))
}

/// Transform that swaps in `replacement` for the field of the same name
fn set(replacement: Field) -> impl FnMut(Field) -> Field {
    move |field: Field| {
        if std::mem::discriminant(&field) == std::mem::discriminant(&replacement) {
            replacement.clone()
        } else {
            field
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{atom, car, cdr, cons, empty_list, list};

    fn pct(value: u16) -> Option<Percent> {
        Some(Percent::new(value))
    }

    #[test]
    fn row_and_column_are_sized_empty_lists() {
        let r = row(40);
        assert!(crate::display::is_empty(&r));
        assert_eq!(r.geometry().width, pct(100));
        assert_eq!(r.geometry().height, pct(40));

        let c = column(25);
        assert_eq!(c.geometry().width, pct(25));
        assert_eq!(c.geometry().height, pct(100));
    }

    #[test]
    fn sizing_reads_back_exactly() {
        let a = atom("a");
        assert_eq!(size_width(37, &a).unwrap().geometry().width, pct(37));
        assert_eq!(size_height(63, &a).unwrap().geometry().height, pct(63));
        // input untouched
        assert_eq!(a, atom("a"));
    }

    #[test]
    fn sizing_a_list_is_a_type_error() {
        assert!(matches!(
            size_width(10, &empty_list()),
            Err(DisplayError::Type {
                found: Kind::List,
                ..
            })
        ));
        assert!(size_height(10, &empty_list()).is_err());
    }

    #[test]
    fn indent_sets_left_on_atoms() {
        let a = indent(30, &size_width(50, &atom("a")).unwrap());
        assert_eq!(a.geometry().left, pct(30));
        assert_eq!(a.geometry().width, pct(50));
    }

    #[test]
    fn indent_on_list_leaves_children_alone() {
        let child = vindent(5, &atom("child"));
        let l = cons(&child, &column(40)).unwrap();
        let moved = indent(30, &l);

        assert_eq!(moved.geometry().left, pct(30));
        assert_eq!(moved.geometry().width, pct(40));
        assert_eq!(car(&moved).unwrap(), child);
    }

    #[test]
    fn vindent_sets_top() {
        let a = vindent(50, &size_height(50, &atom("c")).unwrap());
        assert_eq!(a.geometry().top, pct(50));
        assert_eq!(vindent(90, &row(10)).geometry().top, pct(90));
    }

    #[test]
    fn label_titles_atoms_only() {
        let a = label(&atom("body"), "Title").unwrap();
        assert_eq!(a.as_atom().unwrap().label(), Some("Title"));
        assert_eq!(a.as_atom().unwrap().content(), "body");

        assert!(matches!(
            label(&empty_list(), "Title"),
            Err(DisplayError::Type { .. })
        ));
    }

    #[test]
    fn inline_accumulates_offsets_head_first() {
        let row = list([
            size_width(20, &atom("a")).unwrap(),
            size_width(30, &atom("b")).unwrap(),
            size_width(50, &atom("c")).unwrap(),
        ]);
        let inlined = inline(&row).unwrap();

        let placed: Vec<_> = inlined
            .as_list()
            .unwrap()
            .iter()
            .map(|d| {
                let a = d.as_atom().unwrap();
                (a.content(), a.geometry().left, a.geometry().width)
            })
            .collect();
        assert_eq!(
            placed,
            [
                ("a", pct(0), pct(20)),
                ("b", pct(20), pct(30)),
                ("c", pct(50), pct(50)),
            ]
        );
        assert_eq!(inlined.geometry(), row.geometry());
    }

    #[test]
    fn inline_keeps_overflow() {
        let row = list([
            size_width(80, &atom("a")).unwrap(),
            size_width(80, &atom("b")).unwrap(),
        ]);
        let inlined = inline(&row).unwrap();
        let second = car(&cdr(&inlined).unwrap()).unwrap();
        assert_eq!(second.geometry().left, pct(80));
    }

    #[test]
    fn inline_of_empty_list_is_empty() {
        let inlined = inline(&row(10)).unwrap();
        assert!(crate::display::is_empty(&inlined));
        assert_eq!(inlined.geometry().height, pct(10));
    }

    #[test]
    fn inline_rejects_nested_lists() {
        let mixed = list([size_width(50, &atom("a")).unwrap(), empty_list()]);
        assert!(matches!(
            inline(&mixed),
            Err(DisplayError::Layout { .. })
        ));
    }

    #[test]
    fn inline_rejects_atoms_and_unsized_children() {
        assert!(matches!(
            inline(&atom("a")),
            Err(DisplayError::Layout { .. })
        ));
        assert!(matches!(
            inline(&list([atom("no width")])),
            Err(DisplayError::Layout { .. })
        ));
    }
}
