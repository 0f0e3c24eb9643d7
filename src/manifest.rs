//! QRC manifest generation.
//!
//! Renders the ordered list of packaged paths as a Qt resource-collection
//! document: a legacy `<!DOCTYPE RCC>` line followed by a two-space
//! pretty-printed `<RCC>` tree. The builder performs no filesystem I/O;
//! writing the string to disk is the driver's job.

use std::path::Path;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::PackError;

/// Fixed first line of every manifest
pub const DOCTYPE_LINE: &str = "<!DOCTYPE RCC>";

/// Default resource prefix the icon entries are grouped under
pub const DEFAULT_PREFIX: &str = "/icons";

/// Default manifest file name within the destination root
pub const DEFAULT_QRC_NAME: &str = "breeze-icons.qrc";

/// Render `entries` relative to `destination_root` with forward-slash
/// separators, regardless of host convention. An entry outside the root
/// is an internal contract breach.
fn relative_entry(entry: &Path, destination_root: &Path) -> Result<String, PackError> {
    let relative = entry
        .strip_prefix(destination_root)
        .map_err(|_| PackError::ManifestPathOutsideRoot {
            path: entry.to_path_buf(),
            root: destination_root.to_path_buf(),
        })?;

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

/// Build the manifest document for the given destination paths, in the
/// exact order supplied. Entries are never resorted here; the collector
/// already produces a deterministic order.
pub fn build_manifest(
    entries: &[impl AsRef<Path>],
    destination_root: &Path,
    prefix: &str,
) -> Result<String, PackError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let write_err = |e: quick_xml::Error| PackError::ManifestWrite { source: e };

    let mut rcc = BytesStart::new("RCC");
    rcc.push_attribute(("version", "1.0"));
    writer.write_event(Event::Start(rcc)).map_err(write_err)?;

    let mut qresource = BytesStart::new("qresource");
    qresource.push_attribute(("prefix", prefix));
    writer
        .write_event(Event::Start(qresource))
        .map_err(write_err)?;

    for entry in entries {
        let relative = relative_entry(entry.as_ref(), destination_root)?;
        writer
            .write_event(Event::Start(BytesStart::new("file")))
            .map_err(write_err)?;
        writer
            .write_event(Event::Text(BytesText::new(&relative)))
            .map_err(write_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("file")))
            .map_err(write_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("qresource")))
        .map_err(write_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("RCC")))
        .map_err(write_err)?;

    let body = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    Ok(format!("{DOCTYPE_LINE}\n{body}\n"))
}
