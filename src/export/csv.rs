use crate::error::ExportError;
use crate::model::Quotation;
use crate::pricing::money::round_currency;
use std::fs::File;
use std::path::Path;

/// Writes one row per quotation line. Amounts are rounded to paise.
pub fn export_csv<P: AsRef<Path>>(quotation: &Quotation, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);

    writer.write_record([
        "Washroom", "Category", "Item", "Unit", "MRP", "Base", "Margin", "GST", "Total",
    ])?;

    let money = |value: f64| format!("{:.2}", round_currency(value));

    for washroom in &quotation.washrooms {
        for category in &washroom.categories {
            for line in &category.lines {
                writer.write_record([
                    washroom.washroom_name.clone(),
                    category.category.clone(),
                    line.item.name.clone(),
                    line.item.unit.clone(),
                    line.item.mrp.map(money).unwrap_or_default(),
                    money(line.pricing.base),
                    money(line.pricing.margin),
                    money(line.pricing.gst),
                    money(line.pricing.total),
                ])?;
            }
        }
    }

    let summary = &quotation.summary;
    writer.write_record([
        String::new(),
        String::new(),
        "Logistics & creative services".to_string(),
        String::new(),
        String::new(),
        money(summary.logistics_charge),
        money(0.0),
        money(0.0),
        money(summary.logistics_charge),
    ])?;
    writer.write_record([
        String::new(),
        String::new(),
        "Grand total".to_string(),
        String::new(),
        money(summary.mrp_total),
        money(summary.special_price_subtotal),
        String::new(),
        money(summary.total_gst),
        money(summary.grand_total),
    ])?;

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}
