use crate::error::ExportError;
use crate::model::Quotation;
use crate::pricing::money::format_currency;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Bumped whenever the exported document changes shape.
pub const FORMAT_VERSION: u32 = 1;

/// Headline totals as they appear on a printed quotation.
#[derive(Debug, Serialize)]
struct DisplayTotals {
    mrp_total: String,
    special_price_subtotal: String,
    logistics_charge: String,
    total_gst: String,
    grand_total: String,
    average_margin: String,
}

impl DisplayTotals {
    fn of(quotation: &Quotation) -> Self {
        let summary = &quotation.summary;
        Self {
            mrp_total: format_currency(summary.mrp_total),
            special_price_subtotal: format_currency(summary.special_price_subtotal),
            logistics_charge: format_currency(summary.logistics_charge),
            total_gst: format_currency(summary.total_gst),
            grand_total: format_currency(summary.grand_total),
            average_margin: format!("{:.2}%", quotation.pricing.summary.average_margin),
        }
    }
}

#[derive(Debug, Serialize)]
struct QuotationDocument<'a> {
    format_version: u32,
    project_name: &'a str,
    display: DisplayTotals,
    quotation: &'a Quotation,
}

/// Writes the quotation as a versioned JSON document.
///
/// `quotation` carries the unrounded payload; `display` repeats the headline
/// totals formatted in rupees for consumers that only render them.
pub fn export_json<P: AsRef<Path>>(quotation: &Quotation, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let document = QuotationDocument {
        format_version: FORMAT_VERSION,
        project_name: &quotation.project_name,
        display: DisplayTotals::of(quotation),
        quotation,
    };

    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}
