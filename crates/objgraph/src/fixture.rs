//! Persistable types shared by the unit tests of this crate.

use crate::{
    codec::{Reader, Writer},
    Error, Object, ObjectID,
};

/// A singly linked node; enough to build chains, rings and self-loops.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Node {
    pub next: Option<ObjectID>,
    pub value: i32,
}

impl Object for Node {
    fn type_name(&self) -> &'static str { "Node" }

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

crate::register!(Node);

/// A field-less object counting how often its completion hook ran.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub awake: u32,
}

impl Object for Leaf {
    fn type_name(&self) -> &'static str { "Leaf" }

    fn after_read(&mut self) { self.awake += 1; }
}

crate::register!(Leaf);

/// An object with two references and a label.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pair {
    pub left: Option<ObjectID>,
    pub right: Option<ObjectID>,
    pub label: String,
}

impl Object for Pair {
    fn type_name(&self) -> &'static str { "Pair" }

    fn write_fields(&self, writer: &mut Writer<'_>) -> Result<(), Error> {
        writer.write_object(self.left)?;
        writer.write_object(self.right)?;
        writer.write_field(&self.label)
    }

    fn read_fields(&mut self, reader: &mut Reader<'_>) -> Result<(), Error> {
        self.left = reader.read_object()?;
        self.right = reader.read_object()?;
        self.label = reader.read_field()?;
        Ok(())
    }
}

crate::register!(Pair);

/// A registry holding exactly the fixture types.
pub fn registry() -> crate::TypeRegistry {
    let mut registry = crate::TypeRegistry::new();
    registry.register_type::<Node>().expect("fresh registry");
    registry.register_type::<Leaf>().expect("fresh registry");
    registry.register_type::<Pair>().expect("fresh registry");

    registry
}

/// Builds the three-node ring `A -> B -> C -> A` with values 1, 2 and 3 and
/// returns `[A, B, C]`.
pub fn ring(graph: &mut crate::Graph) -> [ObjectID; 3] {
    let a = graph.insert(Node { next: None, value: 1 });
    let b = graph.insert(Node { next: None, value: 2 });
    let c = graph.insert(Node { next: Some(a), value: 3 });

    graph.get_as_mut::<Node>(a).expect("just inserted").next = Some(b);
    graph.get_as_mut::<Node>(b).expect("just inserted").next = Some(c);

    [a, b, c]
}
