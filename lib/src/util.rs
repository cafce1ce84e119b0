use anyhow::Result;

use std::io::Write;
use std::path::Path;

use oxigraph::io::{RdfFormat, RdfSerializer};
use oxigraph::model::Quad;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use log::info;

/// Characters left bare by URI-component encoding; everything else becomes
/// a percent escape, so names differing only in reserved characters map to
/// distinct IRIs.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a table or column name for use inside an IRI.
pub fn iri_encode(name: &str) -> String {
    utf8_percent_encode(name, COMPONENT).to_string()
}

/// Blank node label for a table's container node. Labels are derived from a
/// digest of the table name because the label syntax forbids the characters
/// percent-encoding would introduce; the digest keeps them deterministic and
/// collision-free.
pub fn table_bnode_id(table: &str) -> String {
    let hash = blake3::hash(table.as_bytes()).to_hex();
    format!("b{}", &hash.as_str()[..16])
}

/// Blank node label for the row at the given 1-based index.
pub fn row_bnode_id(table: &str, index: usize) -> String {
    format!("{}r{}", table_bnode_id(table), index)
}

/// Serialize quads as N-Quads to the given writer.
pub fn write_quads<W: Write>(quads: impl IntoIterator<Item = Quad>, writer: W) -> Result<()> {
    let mut serializer = RdfSerializer::from_format(RdfFormat::NQuads).for_writer(writer);
    for quad in quads {
        serializer.serialize_quad(&quad)?;
    }
    serializer.finish()?;
    Ok(())
}

/// Serialize quads as N-Quads into a file.
pub fn write_quads_to_file(quads: impl IntoIterator<Item = Quad>, file: &Path) -> Result<()> {
    info!("Writing quads to file: {}", file.display());
    let file = std::fs::File::create(file)?;
    write_quads(quads, file)
}
