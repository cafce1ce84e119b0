use oxigraph::model::vocab::{rdf, xsd};
use oxigraph::model::{GraphName, GraphNameRef, Literal, NamedNode, Quad, Subject, Term};

use quadrify::config::{Config, QuadMode};
use quadrify::consts::FX_ROOT;
use quadrify::snapshot::parse_snapshot;
use quadrify::source::{Column, ColumnType, MemorySource, Row, Table, Value};
use quadrify::util::write_quads;
use quadrify::QuadGenerator;

fn flag_source() -> MemorySource {
    let mut table = Table::new("T1", vec![Column::new("flag", ColumnType::Boolean)]);
    table.push_row(Row::new(vec![(
        "flag".to_string(),
        Some(Value::Boolean(true)),
    )]));
    let mut source = MemorySource::new();
    source.add_table(table);
    source
}

fn facade_x(base: &str) -> Config {
    Config::new(QuadMode::FacadeX, base)
}

#[test]
fn scenario_a_facade_x() {
    let generator = QuadGenerator::new(flag_source(), &facade_x("http://ex.org/#")).unwrap();
    let quads: Vec<Quad> = generator.quads().collect();
    assert_eq!(quads.len(), 3);

    let graph = GraphName::NamedNode(NamedNode::new("http://ex.org/#T1").unwrap());
    assert!(quads.iter().all(|q| q.graph_name == graph));

    // a root-type quad
    assert_eq!(quads[0].predicate.as_ref(), rdf::TYPE);
    assert_eq!(quads[0].object, Term::from(FX_ROOT.into_owned()));
    assert!(matches!(quads[0].subject, Subject::BlankNode(_)));

    // a membership quad linking the root to the row node
    assert_eq!(
        quads[1].predicate,
        NamedNode::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#_1").unwrap()
    );
    assert_eq!(quads[1].subject, quads[0].subject);

    // a cell quad on the row node
    let row_node = match &quads[1].object {
        Term::BlankNode(b) => b.clone(),
        other => panic!("expected a blank row node, got {}", other),
    };
    assert_eq!(quads[2].subject, Subject::BlankNode(row_node));
    assert_eq!(
        quads[2].predicate,
        NamedNode::new("http://sparql.xyz/facade-x/data/flag").unwrap()
    );
    assert_eq!(
        quads[2].object,
        Term::from(Literal::new_typed_literal("true", xsd::BOOLEAN))
    );
}

#[test]
fn scenario_b_csv() {
    let config = Config::new(QuadMode::Csv, "http://ex.org/#");
    let generator = QuadGenerator::new(flag_source(), &config).unwrap();
    let quads: Vec<Quad> = generator.quads().collect();

    let expected = Quad::new(
        NamedNode::new("csv:table/T1/row/1").unwrap(),
        NamedNode::new("csv:flag").unwrap(),
        Literal::new_typed_literal("true", xsd::BOOLEAN),
        NamedNode::new("csv:table/T1").unwrap(),
    );
    assert_eq!(quads, vec![expected]);
}

#[test]
fn scenario_c_all_null_row() {
    let mut table = Table::new("T1", vec![Column::new("flag", ColumnType::Boolean)]);
    table.push_row(Row::new(vec![("flag".to_string(), None)]));
    let mut source = MemorySource::new();
    source.add_table(table);

    let generator = QuadGenerator::new(source.clone(), &facade_x("http://ex.org/#")).unwrap();
    let quads: Vec<Quad> = generator.quads().collect();
    // structural quads survive, no cell quads
    assert_eq!(quads.len(), 2);
    assert!(quads
        .iter()
        .all(|q| !q.predicate.as_str().contains("facade-x/data")));

    let config = Config::new(QuadMode::Csv, "http://ex.org/#");
    let generator = QuadGenerator::new(source, &config).unwrap();
    assert_eq!(generator.quads().count(), 0);
}

#[test]
fn structural_quad_counts_are_independent_of_columns() {
    let mut table = Table::new(
        "Wide",
        vec![
            Column::new("a", ColumnType::Text),
            Column::new("b", ColumnType::Long),
            Column::new("c", ColumnType::Double),
        ],
    );
    for i in 0..4 {
        table.push_row(Row::new(vec![
            ("a".to_string(), Some(Value::Text(format!("row{}", i)))),
            ("b".to_string(), Some(Value::Integer(i))),
            ("c".to_string(), None),
        ]));
    }
    let mut source = MemorySource::new();
    source.add_table(table);

    let generator = QuadGenerator::new(source.clone(), &facade_x("http://ex.org/#")).unwrap();
    let quads: Vec<Quad> = generator.quads().collect();

    let memberships: Vec<&Quad> = quads
        .iter()
        .filter(|q| q.predicate.as_str().contains("rdf-syntax-ns#_"))
        .collect();
    assert_eq!(memberships.len(), 4);
    for (i, quad) in memberships.iter().enumerate() {
        assert_eq!(
            quad.predicate,
            NamedNode::new(format!(
                "http://www.w3.org/1999/02/22-rdf-syntax-ns#_{}",
                i + 1
            ))
            .unwrap()
        );
    }
    let roots = quads
        .iter()
        .filter(|q| q.predicate.as_ref() == rdf::TYPE)
        .count();
    assert_eq!(roots, 1);

    // csv mode: one quad per non-null cell, 8 here, and no structure at all
    let config = Config::new(QuadMode::Csv, "http://ex.org/#");
    let generator = QuadGenerator::new(source, &config).unwrap();
    let quads: Vec<Quad> = generator.quads().collect();
    assert_eq!(quads.len(), 8);
    assert!(quads
        .iter()
        .all(|q| q.predicate.as_ref() != rdf::TYPE
            && !q.predicate.as_str().contains("rdf-syntax-ns#_")));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let snapshot = r#"{"tables": [
        {
            "name": "My Orders",
            "columns": [
                {"name": "id", "type": "long"},
                {"name": "placed", "type": "datetime"},
                {"name": "total", "type": "currency"}
            ],
            "rows": [
                {"id": 1, "placed": "2023-01-02T03:04:05Z", "total": "$9.99"},
                {"id": 2, "placed": null, "total": null}
            ]
        },
        {"name": "Empty", "columns": [], "rows": []}
    ]}"#;

    for mode in [QuadMode::FacadeX, QuadMode::Csv] {
        let config = Config::new(mode, "http://ex.org/#");
        let mut outputs = vec![];
        for _ in 0..2 {
            let source =
                parse_snapshot(snapshot, std::path::Path::new("db.json")).unwrap();
            let generator = QuadGenerator::new(source, &config).unwrap();
            let mut bytes = Vec::new();
            write_quads(generator.quads(), &mut bytes).unwrap();
            outputs.push(bytes);
        }
        assert_eq!(outputs[0], outputs[1]);
        assert!(!outputs[0].is_empty());
    }
}

#[test]
fn quads_restart_from_the_beginning() {
    let generator = QuadGenerator::new(flag_source(), &facade_x("http://ex.org/#")).unwrap();
    let first: Vec<Quad> = generator.quads().collect();
    let second: Vec<Quad> = generator.quads().collect();
    assert_eq!(first, second);
}

#[test]
fn row_numbering_follows_iteration_order() {
    let mut table = Table::new("T", vec![Column::new("pk", ColumnType::Long)]);
    // primary-key-like values descend; row numbers must not follow them
    for pk in [30, 20, 10] {
        table.push_row(Row::new(vec![(
            "pk".to_string(),
            Some(Value::Integer(pk)),
        )]));
    }
    let mut source = MemorySource::new();
    source.add_table(table);

    let config = Config::new(QuadMode::Csv, "http://ex.org/#");
    let generator = QuadGenerator::new(source, &config).unwrap();
    let quads: Vec<Quad> = generator.quads().collect();

    let expect = [(1, "30"), (2, "20"), (3, "10")];
    for (quad, (row, pk)) in quads.iter().zip(expect) {
        assert_eq!(
            quad.subject,
            Subject::NamedNode(NamedNode::new(format!("csv:table/T/row/{}", row)).unwrap())
        );
        assert_eq!(
            quad.object,
            Term::from(Literal::new_typed_literal(pk, xsd::LONG))
        );
    }
}

#[test]
fn tables_partition_graphs() {
    let snapshot = r#"{"tables": [
        {"name": "A", "columns": [{"name": "x", "type": "text"}], "rows": [{"x": "1"}]},
        {"name": "B", "columns": [{"name": "x", "type": "text"}], "rows": [{"x": "2"}]}
    ]}"#;
    let source = parse_snapshot(snapshot, std::path::Path::new("db.json")).unwrap();
    let generator = QuadGenerator::new(source, &facade_x("http://ex.org/#")).unwrap();

    let graph_a = NamedNode::new("http://ex.org/#A").unwrap();
    let in_a = generator
        .match_pattern(
            None,
            None,
            None,
            Some(GraphNameRef::NamedNode(graph_a.as_ref())),
        )
        .unwrap();
    assert_eq!(in_a.len(), 3);
    assert!(in_a.iter().all(|q| q.graph_name.to_string().contains("#A")));

    let all = generator.match_pattern(None, None, None, None).unwrap();
    assert_eq!(all.len(), 6);
}
