use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating, parsing, or flattening a `.pdsc` file.
///
/// Every variant is terminal for the current invocation: the host reports it
/// once and no partial catalog is ever displayed.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No source file was found in the workspace root.
    #[error("The device descriptor file does not exist at: {}", path.display())]
    MissingSourceFile { path: PathBuf },

    /// The default file is absent and more than one `.pdsc` candidate exists.
    #[error(
        "No {file_name} in {} and {count} other .pdsc files found; pass --file to pick one",
        root.display()
    )]
    AmbiguousSource {
        root: PathBuf,
        file_name: String,
        count: usize,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The XML could not be deserialized into the package model.
    #[error("Failed to process the .pdsc file: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// The XML is not well formed.
    #[error("Failed to process the .pdsc file: {0}")]
    XmlSyntax(#[from] quick_xml::Error),

    /// A required nested node (e.g. `package.devices[0].family`) is absent.
    #[error("Invalid .pdsc file structure: missing {missing}")]
    MalformedSource { missing: &'static str },

    /// A required naming attribute is absent on an element.
    #[error("Invalid .pdsc file structure: <{element}> without {attribute} attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// The document is structurally valid but yields no usable groups.
    #[error("No devices found in the .pdsc file ({families} families, {sub_families} subfamilies)")]
    EmptyCatalog { families: usize, sub_families: usize },
}
