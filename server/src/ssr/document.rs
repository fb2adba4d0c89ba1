//! HTML document assembly.

use client::boot::{ROOT_ELEMENT_ID, STATE_GLOBAL};
use client::render::escape_text;
use query::Snapshot;

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;

/// `src` of the browser bundle script tag.
const CLIENT_BUNDLE_SRC: &str = "/client.bundle.js";

/// Assemble the complete response document: rendered markup inside the
/// hydration root, the snapshot assigned to the well-known global, then the
/// client bundle. Every `<` in the serialized snapshot is emitted as
/// `\u003c` so embedded data can never terminate the script element early.
///
/// # Errors
///
/// Returns the underlying error when the snapshot fails to serialize.
pub fn page(title: &str, markup: &str, snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    let state = serde_json::to_string(snapshot)?.replace('<', "\\u003c");
    Ok(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <div id=\"{ROOT_ELEMENT_ID}\">{markup}</div>\n\
         <script>window.{STATE_GLOBAL} = {state};</script>\n\
         <script src=\"{CLIENT_BUNDLE_SRC}\"></script>\n\
         </body>\n\
         </html>\n",
        title = escape_text(title),
    ))
}
