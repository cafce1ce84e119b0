//! Defines the fixed namespaces and constant NamedNodeRefs used by the quad
//! emitters: the RDF container namespace, the Facade-X ontology and data
//! namespaces, the CSV context namespace, and the XSD numeric marker.

use oxigraph::model::NamedNodeRef;

/// Root marker for the Facade-X container modeling of a table.
pub const FX_ROOT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://sparql.xyz/facade-x/ns/root");

/// Stand-in numeric datatype emitted for complex columns. Not a real XSD
/// datatype; consumers treat it as an opaque numeric marker.
pub const XSD_NUMBER: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#number");

/// RDF syntax namespace; ordinal container-membership properties are
/// `<RDF_NS>_1`, `<RDF_NS>_2`, ...
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Namespace for per-cell predicates in facade-x mode.
pub const DATA_NS: &str = "http://sparql.xyz/facade-x/data/";

/// Namespace for subjects, predicates and contexts in csv mode.
pub const CSV_NS: &str = "csv:";

/// Base IRI used when the caller does not provide one.
pub const DEFAULT_BASE_IRI: &str = "http://example.org/data#";
