use objgraph_serialize::text::{
    de::TextDeserializer,
    ser::{Style, TextSerializer},
};

use crate::{
    fixture::{self, Leaf, Node},
    Graph, Handle, Session,
};

#[test]
fn identity_spans_calls() {
    let registry = fixture::registry();
    let mut graph = Graph::new();
    let [a, b, _] = fixture::ring(&mut graph);

    let mut session = Session::new(&registry);
    let mut serializer = TextSerializer::new(Vec::new(), Style::Compact);

    session.write_object(&graph, &mut serializer, Some(a)).unwrap();
    session.write_object(&graph, &mut serializer, Some(b)).unwrap();

    assert_eq!(session.identities().len(), 3);
    assert_eq!(
        serializer.finish().unwrap(),
        b"Node { Node { Node { # 1 3 } 2 } 1 } # 2\n"
    );
}

#[test]
fn reset_starts_over() {
    let registry = fixture::registry();
    let mut graph = Graph::new();
    let leaf = graph.insert(Leaf::default());

    let mut session = Session::new(&registry);
    let mut serializer = TextSerializer::new(Vec::new(), Style::Compact);

    session.write_object(&graph, &mut serializer, Some(leaf)).unwrap();
    session.reset();
    assert!(session.identities().is_empty());

    session.write_object(&graph, &mut serializer, Some(leaf)).unwrap();

    assert_eq!(
        session.identities().lookup_by_object(leaf),
        Some(Handle::FIRST)
    );
    assert_eq!(serializer.finish().unwrap(), b"Leaf { } Leaf { }\n");
}

#[test]
fn sessions_are_isolated() {
    let registry = fixture::registry();
    let mut graph = Graph::new();
    let first = graph.insert(Leaf::default());
    let second = graph.insert(Node::default());

    let mut one = Session::new(&registry);
    let mut two = Session::new(&registry);
    let mut sink = TextSerializer::new(Vec::new(), Style::Compact);

    one.write_object(&graph, &mut sink, Some(first)).unwrap();
    two.write_object(&graph, &mut sink, Some(second)).unwrap();

    assert_eq!(one.identities().lookup_by_object(first), Some(Handle::FIRST));
    assert_eq!(two.identities().lookup_by_object(second), Some(Handle::FIRST));
    assert!(one.identities().lookup_by_object(second).is_none());
}

#[test]
fn read_across_calls() {
    let registry = fixture::registry();
    let mut graph = Graph::new();
    let mut deserializer = TextDeserializer::new(
        "Node { (null) 4 } Node { # 1 5 } # 2 (null)".as_bytes(),
    );

    let mut session = Session::new(&registry);
    let first =
        session.read_object(&mut graph, &mut deserializer).unwrap().unwrap();
    let second =
        session.read_object(&mut graph, &mut deserializer).unwrap().unwrap();
    let again =
        session.read_object(&mut graph, &mut deserializer).unwrap().unwrap();

    assert_eq!(second, again);
    assert_eq!(graph.get_as::<Node>(second).unwrap().next, Some(first));
    assert_eq!(
        session.read_object(&mut graph, &mut deserializer).unwrap(),
        None
    );
    assert!(std::ptr::eq(session.registry(), &registry));
}

#[test]
fn reset_forgets_read_handles() {
    let registry = fixture::registry();
    let mut graph = Graph::new();
    let mut deserializer = TextDeserializer::new("Leaf { } # 1".as_bytes());

    let mut session = Session::new(&registry);
    session.read_object(&mut graph, &mut deserializer).unwrap();
    session.reset();

    assert!(matches!(
        session.read_object(&mut graph, &mut deserializer),
        Err(crate::Error::UnresolvedReference(handle))
            if handle == Handle::FIRST
    ));
}

#[test]
fn depth_limit_applies_to_every_call() {
    let registry = fixture::registry();
    let mut graph = Graph::new();
    let [a, ..] = fixture::ring(&mut graph);

    let mut session = Session::new(&registry).with_max_depth(2);
    assert_eq!(session.max_depth(), 2);

    let mut serializer = TextSerializer::new(Vec::new(), Style::Compact);
    assert!(matches!(
        session.write_object(&graph, &mut serializer, Some(a)),
        Err(crate::Error::DepthLimit(2))
    ));

    let text = "Node { Node { Node { # 1 3 } 2 } 1 }";
    let mut deserializer = TextDeserializer::new(text.as_bytes());
    let mut copy = Graph::new();
    session.reset();
    assert!(matches!(
        session.read_object(&mut copy, &mut deserializer),
        Err(crate::Error::DepthLimit(2))
    ));
}
