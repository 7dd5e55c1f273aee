// SPDX-License-Identifier: MPL-2.0
//! Standalone HTML document that prints a sheet as soon as it loads.

use crate::media::image::to_data_url;
use crate::media::layout::Sheet;

/// Title of the print window.
pub const PRINT_TITLE: &str = "Print Passport Photo";

/// Returns a minimal page embedding the sheet that opens the print dialog
/// on load and closes itself afterwards.
#[must_use]
pub fn print_document(sheet: &Sheet) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "  <head><title>{title}</title></head>\n",
            "  <body style=\"margin:0; display:flex; justify-content:center; align-items:center;\">\n",
            "    <img src=\"{src}\" style=\"max-width:100%; height:auto;\" ",
            "onload=\"window.print();window.close()\" />\n",
            "  </body>\n",
            "</html>\n"
        ),
        title = PRINT_TITLE,
        src = to_data_url(&sheet.image),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::print::PrintLayout;
    use crate::test_utils::sample_jpeg;

    #[test]
    fn document_embeds_sheet_and_prints_on_load() {
        let sheet = Sheet {
            image: sample_jpeg(4, 4),
            copies: 1,
            layout: PrintLayout::Single,
            page_width_mm: 61.0,
            page_height_mm: 61.0,
        };
        let html = print_document(&sheet);
        assert!(html.contains("<title>Print Passport Photo</title>"));
        assert!(html.contains("src=\"data:image/jpeg;base64,"));
        assert!(html.contains("onload=\"window.print();window.close()\""));
    }
}
