//! The persistable types known to the demo executable.

use std::cell::Cell;

use derive_new::new;
use objgraph::{
    codec::{Reader, Writer},
    Error, Graph, Object, ObjectID,
};

thread_local! {
    static AWAKENED: Cell<usize> = const { Cell::new(0) };
}

/// Returns how many [`Beacon`]s have been read on the current thread.
#[must_use]
pub fn awakened() -> usize { AWAKENED.get() }

/// A field-less object that announces itself once it has been read.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Beacon;

impl Object for Beacon {
    fn type_name(&self) -> &'static str { "Beacon" }

    fn after_read(&mut self) {
        AWAKENED.set(AWAKENED.get() + 1);
        log::info!("I'm alive!!!");
    }
}

objgraph::register!(Beacon);

/// A link to any other object plus an integer payload.
#[derive(Debug, Default, Clone, PartialEq, Eq, new)]
pub struct Chain {
    /// The next object of the chain; `None` ends it.
    pub next: Option<ObjectID>,

    /// The payload.
    pub value: i32,
}

impl Object for Chain {
    fn type_name(&self) -> &'static str { "Chain" }

    fn write_fields(&self, writer: &mut Writer<'_>) -> Result<(), Error> {
        writer.write_object(self.next)?;
        writer.write_field(&self.value)
    }

    fn read_fields(&mut self, reader: &mut Reader<'_>) -> Result<(), Error> {
        self.next = reader.read_object()?;
        self.value = reader.read_field()?;

        Ok(())
    }
}

objgraph::register!(Chain);

/// Builds the ring `A -> B -> C -> A` with values 1, 2 and 3 and returns `A`.
pub fn ring(graph: &mut Graph) -> ObjectID {
    let a = graph.insert(Chain::new(None, 1));
    let b = graph.insert(Chain::new(None, 2));
    let c = graph.insert(Chain::new(Some(a), 3));

    for (from, to) in [(a, b), (b, c)] {
        if let Some(chain) = graph.get_as_mut::<Chain>(from) {
            chain.next = Some(to);
        }
    }

    a
}
