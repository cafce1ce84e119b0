//! The two quad emitters. Each is an explicit cursor over (table, row)
//! positions implementing `Iterator<Item = Quad>`: tables are visited in
//! source order, rows in table order, and each `next()` call is one unit of
//! pull demand.

use std::collections::VecDeque;

use log::debug;
use oxigraph::model::vocab::rdf;
use oxigraph::model::{BlankNode, Literal, NamedNode, Quad};

use crate::coerce::{coerce, plain_literal};
use crate::consts::{CSV_NS, DATA_NS, FX_ROOT, RDF_NS};
use crate::source::{Row, Table, TableSource, Value};
use crate::util::{iri_encode, row_bnode_id, table_bnode_id};

// Emitted IRIs are concatenations of a validated base (or a fixed namespace)
// with percent-encoded name components, so they are valid by construction.

fn cell_literal(table: &Table, column: &str, value: &Value) -> Literal {
    match table.column_type(column) {
        Some(column_type) => coerce(value, column_type),
        None => plain_literal(value),
    }
}

/// Facade-X modeling: one graph per table, a blank root node typed `fx:root`,
/// blank row nodes linked from the root through ordinal container-membership
/// properties, and one data quad per non-null cell.
pub struct FacadeXQuads<'a> {
    source: &'a dyn TableSource,
    base_iri: &'a str,
    tables: VecDeque<String>,
    current: Option<TableCursor<'a>>,
    pending: VecDeque<Quad>,
}

/// Position inside one table: the graph and root node are fixed for the
/// table's lifetime, `row` is the 0-based offset of the next row to visit.
struct TableCursor<'a> {
    table: &'a Table,
    graph: NamedNode,
    root: BlankNode,
    row: usize,
}

impl<'a> FacadeXQuads<'a> {
    /// `base` has been IRI-validated by the caller, which is what makes the
    /// unchecked graph-name construction below sound.
    pub(crate) fn new(source: &'a dyn TableSource, base: &'a NamedNode) -> Self {
        FacadeXQuads {
            source,
            base_iri: base.as_str(),
            tables: source.table_names().into(),
            current: None,
            pending: VecDeque::new(),
        }
    }

    /// Advance to the next listed table, queueing its root-type quad.
    /// Returns false when no tables remain.
    fn enter_next_table(&mut self) -> bool {
        while let Some(name) = self.tables.pop_front() {
            let Some(table) = self.source.table(&name) else {
                debug!("table {} not returned by the source, skipping", name);
                continue;
            };
            debug!("emitting facade-x quads for table {}", name);
            let graph =
                NamedNode::new_unchecked(format!("{}{}", self.base_iri, iri_encode(&name)));
            let root = BlankNode::new_unchecked(table_bnode_id(&name));
            self.pending.push_back(Quad::new(
                root.clone(),
                rdf::TYPE,
                FX_ROOT.into_owned(),
                graph.clone(),
            ));
            self.current = Some(TableCursor {
                table,
                graph,
                root,
                row: 0,
            });
            return true;
        }
        false
    }

    /// Queue the membership quad and the cell quads for one row.
    fn emit_row(cursor: &mut TableCursor<'a>, pending: &mut VecDeque<Quad>, row: &Row) {
        cursor.row += 1;
        let index = cursor.row; // rows are numbered from 1
        let node = BlankNode::new_unchecked(row_bnode_id(cursor.table.name(), index));
        let membership = NamedNode::new_unchecked(format!("{}_{}", RDF_NS, index));
        pending.push_back(Quad::new(
            cursor.root.clone(),
            membership,
            node.clone(),
            cursor.graph.clone(),
        ));
        for (column, value) in row.cells() {
            let Some(value) = value else {
                continue; // null values not imported
            };
            let predicate = NamedNode::new_unchecked(format!("{}{}", DATA_NS, iri_encode(column)));
            pending.push_back(Quad::new(
                node.clone(),
                predicate,
                cell_literal(cursor.table, column, value),
                cursor.graph.clone(),
            ));
        }
    }
}

impl Iterator for FacadeXQuads<'_> {
    type Item = Quad;

    fn next(&mut self) -> Option<Quad> {
        loop {
            if let Some(quad) = self.pending.pop_front() {
                return Some(quad);
            }
            match self.current.as_mut() {
                None => {
                    if !self.enter_next_table() {
                        return None;
                    }
                }
                Some(cursor) => {
                    // copy the table reference out so the row borrow is
                    // independent of the cursor borrow
                    let table = cursor.table;
                    match table.rows().get(cursor.row) {
                        Some(row) => Self::emit_row(cursor, &mut self.pending, row),
                        None => self.current = None,
                    }
                }
            }
        }
    }
}

/// CSV modeling: one context per table, IRI-identified rows, one quad per
/// non-null cell and nothing else.
pub struct CsvQuads<'a> {
    source: &'a dyn TableSource,
    tables: VecDeque<String>,
    current: Option<CsvCursor<'a>>,
    pending: VecDeque<Quad>,
}

struct CsvCursor<'a> {
    table: &'a Table,
    context: NamedNode,
    row: usize,
}

impl<'a> CsvQuads<'a> {
    pub(crate) fn new(source: &'a dyn TableSource) -> Self {
        CsvQuads {
            source,
            tables: source.table_names().into(),
            current: None,
            pending: VecDeque::new(),
        }
    }

    fn enter_next_table(&mut self) -> bool {
        while let Some(name) = self.tables.pop_front() {
            let Some(table) = self.source.table(&name) else {
                debug!("table {} not returned by the source, skipping", name);
                continue;
            };
            debug!("emitting csv quads for table {}", name);
            // each table is used as a graph
            let context = NamedNode::new_unchecked(format!("{}table/{}", CSV_NS, iri_encode(&name)));
            self.current = Some(CsvCursor {
                table,
                context,
                row: 0,
            });
            return true;
        }
        false
    }

    fn emit_row(cursor: &mut CsvCursor<'a>, pending: &mut VecDeque<Quad>, row: &Row) {
        cursor.row += 1;
        let index = cursor.row; // row number, 1-indexed as in the source UI
        let subject = NamedNode::new_unchecked(format!("{}/row/{}", cursor.context.as_str(), index));
        for (column, value) in row.cells() {
            let Some(value) = value else {
                continue; // null values not imported
            };
            let predicate = NamedNode::new_unchecked(format!("{}{}", CSV_NS, iri_encode(column)));
            pending.push_back(Quad::new(
                subject.clone(),
                predicate,
                cell_literal(cursor.table, column, value),
                cursor.context.clone(),
            ));
        }
    }
}

impl Iterator for CsvQuads<'_> {
    type Item = Quad;

    fn next(&mut self) -> Option<Quad> {
        loop {
            if let Some(quad) = self.pending.pop_front() {
                return Some(quad);
            }
            match self.current.as_mut() {
                None => {
                    if !self.enter_next_table() {
                        return None;
                    }
                }
                Some(cursor) => {
                    let table = cursor.table;
                    match table.rows().get(cursor.row) {
                        Some(row) => Self::emit_row(cursor, &mut self.pending, row),
                        None => self.current = None,
                    }
                }
            }
        }
    }
}
