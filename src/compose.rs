//! Reactive composition - redraw a template every time an event arrives
//!
//! A reactive component turns "what I showed last time" plus the current
//! event into what it shows now. A [`Composer`] holds a template and a
//! tuple of components together with each component's last output, and a
//! [`Shower`] drives a composer from an event stream into a render sink:
//!
//! ```text
//! event ──▶ components (each sees its own previous output)
//!              │ values
//!              ▼
//!           template ──▶ Display ──▶ RenderSink
//! ```
//!
//! The loop is a plain `while let` over the stream. State is carried in the
//! composer between iterations; nothing recurses.
//!
//! ```ignore
//! let a = component(|prev: Option<&String>, event: &String| {
//!     if event == "a" { event.clone() } else { prev.cloned().unwrap_or_default() }
//! });
//! let composer = compose(|(a,): (String,)| Ok(atom(a)), (a,));
//! show(renderer).until(|e: &String| e == "end").run(&mut composer, events).await?;
//! ```

use crate::display::{Display, DisplayError};
use crate::render::RenderSink;
use anyhow::{Context, Result};
use futures::{Stream, StreamExt};
use std::marker::PhantomData;

/// A value that follows an event stream
pub trait Reactive<E> {
    type Output: Clone;

    /// Output for `event`, given the output for the previous event (`None`
    /// before the first one). A component that has nothing to say about
    /// `event` returns its previous output, or its own default.
    fn react(&self, previous: Option<&Self::Output>, event: &E) -> Self::Output;
}

/// Closure adapter returned by [`component`]
#[derive(Clone, Copy)]
pub struct FnComponent<F, O> {
    react: F,
    _output: PhantomData<fn() -> O>,
}

impl<E, O, F> Reactive<E> for FnComponent<F, O>
where
    F: Fn(Option<&O>, &E) -> O,
    O: Clone,
{
    type Output = O;

    fn react(&self, previous: Option<&O>, event: &E) -> O {
        (self.react)(previous, event)
    }
}

/// Turn a closure `(previous output, event) -> output` into a component
pub fn component<E, O, F>(react: F) -> FnComponent<F, O>
where
    F: Fn(Option<&O>, &E) -> O,
    O: Clone,
{
    FnComponent {
        react,
        _output: PhantomData,
    }
}

/// A fixed set of reactive components, stepped together
pub trait Components<E> {
    /// One output per component, in order
    type Values: Clone;

    fn step(&self, previous: Option<&Self::Values>, event: &E) -> Self::Values;
}

macro_rules! impl_components {
    ($($component:ident $index:tt),+) => {
        impl<E, $($component: Reactive<E>),+> Components<E> for ($($component,)+) {
            type Values = ($($component::Output,)+);

            fn step(&self, previous: Option<&Self::Values>, event: &E) -> Self::Values {
                ($(self.$index.react(previous.map(|values| &values.$index), event),)+)
            }
        }
    };
}

/// No components: the template draws the same display on every event
impl<E> Components<E> for () {
    type Values = ();

    fn step(&self, _previous: Option<&()>, _event: &E) {}
}

impl_components!(A 0);
impl_components!(A 0, B 1);
impl_components!(A 0, B 1, C 2);
impl_components!(A 0, B 1, C 2, D 3);
impl_components!(A 0, B 1, C 2, D 3, F 4);
impl_components!(A 0, B 1, C 2, D 3, F 4, G 5);
impl_components!(A 0, B 1, C 2, D 3, F 4, G 5, H 6);
impl_components!(A 0, B 1, C 2, D 3, F 4, G 5, H 6, I 7);

/// Template plus components plus the components' carried outputs
pub struct Composer<E, C, T>
where
    C: Components<E>,
{
    template: T,
    components: C,
    values: Option<C::Values>,
    ticks: u64,
    _events: PhantomData<fn(&E)>,
}

/// Build a composer from a template and a tuple of components
pub fn compose<E, C, T>(template: T, components: C) -> Composer<E, C, T>
where
    C: Components<E>,
    T: Fn(C::Values) -> Result<Display, DisplayError>,
{
    Composer {
        template,
        components,
        values: None,
        ticks: 0,
        _events: PhantomData,
    }
}

impl<E, C, T> Composer<E, C, T>
where
    C: Components<E>,
    T: Fn(C::Values) -> Result<Display, DisplayError>,
{
    /// Step every component with `event` and lay out the result.
    ///
    /// Component outputs are only carried forward when the template
    /// succeeds, so a failed tick leaves the composer where it was.
    pub fn advance(&mut self, event: &E) -> Result<Display, DisplayError> {
        let values = self.components.step(self.values.as_ref(), event);
        let display = (self.template)(values.clone())?;

        self.values = Some(values);
        self.ticks += 1;
        tracing::trace!(tick = self.ticks, "Composed display");
        Ok(display)
    }

    /// Outputs from the last successful tick
    pub fn values(&self) -> Option<&C::Values> {
        self.values.as_ref()
    }

    /// Number of successful ticks so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Decides which event ends the loop
pub trait Sentinel<E> {
    fn reached(&self, event: &E) -> bool;
}

/// No terminal event: the loop runs until the stream ends
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl<E> Sentinel<E> for Never {
    fn reached(&self, _event: &E) -> bool {
        false
    }
}

impl<E, F> Sentinel<E> for F
where
    F: Fn(&E) -> bool,
{
    fn reached(&self, event: &E) -> bool {
        self(event)
    }
}

/// How a [`Shower`] run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowSummary {
    /// Frames rendered
    pub frames: u64,
    /// True when the terminal event stopped the loop, false when the stream ended
    pub stopped_by_sentinel: bool,
}

/// Drives composers into a render sink
pub struct Shower<S, P = Never> {
    sink: S,
    sentinel: P,
}

/// Render every event of a stream through `sink`
pub fn show<S: RenderSink>(sink: S) -> Shower<S> {
    Shower {
        sink,
        sentinel: Never,
    }
}

impl<S: RenderSink, P> Shower<S, P> {
    /// Stop at the first event matching `sentinel`. That event is not rendered.
    pub fn until<Q>(self, sentinel: Q) -> Shower<S, Q> {
        Shower {
            sink: self.sink,
            sentinel,
        }
    }

    /// Render one frame per event until the stream ends or the sentinel shows up.
    ///
    /// A template or sink failure aborts the loop; the error names the frame.
    pub async fn run<E, C, T, St>(
        &mut self,
        composer: &mut Composer<E, C, T>,
        mut events: St,
    ) -> Result<ShowSummary>
    where
        P: Sentinel<E>,
        C: Components<E>,
        T: Fn(C::Values) -> Result<Display, DisplayError>,
        St: Stream<Item = E> + Unpin,
    {
        let mut frames = 0;

        while let Some(event) = events.next().await {
            if self.sentinel.reached(&event) {
                tracing::debug!(frames, "Terminal event reached");
                return Ok(ShowSummary {
                    frames,
                    stopped_by_sentinel: true,
                });
            }

            let display = composer
                .advance(&event)
                .with_context(|| format!("Failed to compose frame {}", frames + 1))?;
            self.sink
                .render(&display)
                .with_context(|| format!("Failed to render frame {}", frames + 1))?;
            frames += 1;
        }

        tracing::debug!(frames, "Event stream ended");
        Ok(ShowSummary {
            frames,
            stopped_by_sentinel: false,
        })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Take the sink back, e.g. to close a renderer
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{atom, list, Atom};
    use crate::layout::{inline, size_width};
    use crate::render::Renderer;
    use futures::stream;
    use ratatui::{backend::TestBackend, buffer::Buffer};

    /// Shows `name` once an event equal to it arrives, "" until then
    fn latch(name: &'static str) -> impl Reactive<&'static str, Output = String> {
        component(move |previous: Option<&String>, event: &&'static str| {
            if *event == name {
                name.to_string()
            } else {
                previous.cloned().unwrap_or_default()
            }
        })
    }

    fn side_by_side((left, right): (String, String)) -> Result<Display, DisplayError> {
        inline(&list([
            size_width(50, &atom(left))?,
            size_width(50, &atom(right))?,
        ]))
    }

    fn contents(display: &Display) -> Vec<String> {
        display
            .as_list()
            .map(|list| {
                list.iter()
                    .filter_map(Display::as_atom)
                    .map(|a| Atom::content(a).to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn recorder(frames: &mut Vec<Display>) -> impl FnMut(&Display) -> Result<()> + '_ {
        move |display: &Display| {
            frames.push(display.clone());
            Ok(())
        }
    }

    #[test]
    fn components_see_their_own_previous_output() {
        let mut composer = compose(side_by_side, (latch("a"), latch("b")));

        let seen: Vec<_> = ["a", "x", "b"]
            .iter()
            .map(|event| contents(&composer.advance(event).unwrap()))
            .collect();

        assert_eq!(seen, [["a", ""], ["a", ""], ["a", "b"]]);
        assert_eq!(composer.ticks(), 3);
        assert_eq!(
            composer.values(),
            Some(&("a".to_string(), "b".to_string()))
        );
    }

    #[test]
    fn failed_template_keeps_previous_values() {
        let mut composer = compose(
            |(a,): (String,)| {
                if a == "bad" {
                    inline(&atom(a))
                } else {
                    Ok(atom(a))
                }
            },
            (component(|_: Option<&String>, event: &String| event.clone()),),
        );

        composer.advance(&"good".to_string()).unwrap();
        let err = composer.advance(&"bad".to_string()).unwrap_err();
        assert!(matches!(err, DisplayError::Layout { .. }));
        assert_eq!(composer.values(), Some(&("good".to_string(),)));
        assert_eq!(composer.ticks(), 1);
    }

    #[test]
    fn static_template_without_components() {
        let mut composer = compose(|()| Ok(atom("static")), ());

        for event in ["a", "b"] {
            assert_eq!(composer.advance(&event).unwrap(), atom("static"));
        }
        assert_eq!(composer.ticks(), 2);
        assert_eq!(composer.values(), Some(&()));
    }

    #[tokio::test]
    async fn one_render_per_event_in_order() {
        let mut frames = Vec::new();
        let mut composer = compose(side_by_side, (latch("a"), latch("b")));

        let summary = show(recorder(&mut frames))
            .run(&mut composer, stream::iter(["a", "x", "b"]))
            .await
            .unwrap();

        assert_eq!(
            summary,
            ShowSummary {
                frames: 3,
                stopped_by_sentinel: false
            }
        );
        let seen: Vec<_> = frames.iter().map(contents).collect();
        assert_eq!(seen, [["a", ""], ["a", ""], ["a", "b"]]);
    }

    #[tokio::test]
    async fn sentinel_stops_without_rendering() {
        let mut frames = Vec::new();
        let mut composer = compose(side_by_side, (latch("a"), latch("b")));

        let summary = show(recorder(&mut frames))
            .until(|event: &&str| *event == "end")
            .run(&mut composer, stream::iter(["a", "end", "b"]))
            .await
            .unwrap();

        assert!(summary.stopped_by_sentinel);
        assert_eq!(summary.frames, 1);
        assert_eq!(frames.len(), 1);
        assert_eq!(composer.values(), Some(&("a".to_string(), String::new())));
    }

    #[tokio::test]
    async fn seeded_stream_draws_before_the_first_event() {
        let mut frames = Vec::new();
        let mut composer = compose(side_by_side, (latch("a"), latch("b")));

        show(recorder(&mut frames))
            .run(
                &mut composer,
                crate::events::seeded("", stream::iter(["b"])),
            )
            .await
            .unwrap();

        let seen: Vec<_> = frames.iter().map(contents).collect();
        assert_eq!(seen, [["", ""], ["", "b"]]);
    }

    #[tokio::test]
    async fn sink_failure_names_the_frame() {
        let mut composer = compose(side_by_side, (latch("a"), latch("b")));
        let mut calls = 0;
        let sink = |_: &Display| -> Result<()> {
            calls += 1;
            if calls == 2 {
                anyhow::bail!("output closed");
            }
            Ok(())
        };

        let err = show(sink)
            .run(&mut composer, stream::iter(["a", "b", "x"]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to render frame 2");
        assert_eq!(err.root_cause().to_string(), "output closed");
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Tick {
        Number(u32),
        End,
    }

    fn numbers(keep: fn(u32) -> bool) -> impl Reactive<Tick, Output = String> {
        component(move |previous: Option<&String>, event: &Tick| {
            let previous = previous.cloned().unwrap_or_default();
            match event {
                Tick::Number(n) if keep(*n) => format!("{previous}{n}\n"),
                _ => previous,
            }
        })
    }

    #[tokio::test]
    async fn odd_and_even_columns_on_a_terminal() {
        let renderer = Renderer::new(TestBackend::new(20, 8)).unwrap();
        let mut composer = compose(
            |(odd, even): (String, String)| {
                inline(&list([
                    size_width(50, &atom(format!("Odd:\n{odd}")))?,
                    size_width(50, &atom(format!("Even:\n{even}")))?,
                ]))
            },
            (numbers(|n| n % 2 == 1), numbers(|n| n % 2 == 0)),
        );

        let (tx, rx) = tokio::sync::mpsc::channel(16);
        tokio::spawn(async move {
            for n in 1..=8 {
                tx.send(Tick::Number(n)).await.unwrap();
            }
            tx.send(Tick::End).await.unwrap();
        });

        let mut shower = show(renderer).until(|tick: &Tick| *tick == Tick::End);
        let summary = shower
            .run(&mut composer, crate::events::from_channel(rx))
            .await
            .unwrap();
        assert_eq!(summary.frames, 8);
        assert!(summary.stopped_by_sentinel);

        shower.sink().backend().assert_buffer(&Buffer::with_lines([
            "┌────────┐┌────────┐",
            "│Odd:    ││Even:   │",
            "│1       ││2       │",
            "│3       ││4       │",
            "│5       ││6       │",
            "│7       ││8       │",
            "│        ││        │",
            "└────────┘└────────┘",
        ]));
        shower.into_sink().close().unwrap();
    }
}
