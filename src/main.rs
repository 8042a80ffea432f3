use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

use washroom_quote::export::{export_csv, export_json};
use washroom_quote::parser::{load_project_file, load_settings_file};
use washroom_quote::pricing::money::format_currency;
use washroom_quote::pricing::{
    assemble_quotation, calculate_estimate, calculate_project_costs, QuotationRequest,
};

#[derive(Parser, Debug)]
#[command(name = "washroom-quote")]
#[command(about = "Washroom Quote - cost and price washroom renovation projects")]
#[command(version)]
struct Args {
    /// Path to the project input document (JSON)
    #[arg(required = true)]
    file: PathBuf,

    /// Pricing settings document; overrides settings embedded in the project
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Export the quotation to CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Export the quotation to JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let input = load_project_file(&args.file)?;
    let settings = match &args.settings {
        Some(path) => load_settings_file(path)?,
        None => input.settings(),
    };
    let catalog = input.service_catalog();
    let brands = input.brand_catalog();
    let ad_hoc = input.ad_hoc_costs();
    let overrides = input.overrides();

    let costs = calculate_project_costs(
        &input.washrooms,
        &catalog,
        &brands,
        &ad_hoc,
        &overrides,
        &settings,
    );
    let quotation = assemble_quotation(&QuotationRequest {
        project_name: &input.name,
        washrooms: &input.washrooms,
        catalog: &catalog,
        brands: &brands,
        ad_hoc: &ad_hoc,
        overrides: &overrides,
        margins: &input.margins,
        settings: &settings,
    });

    println!("Project: {}", input.name);
    for washroom in &costs.per_washroom_costs {
        println!(
            "  {:<20} {:>8.1} sqft  services {:>14}  products {:>14}",
            washroom.washroom_name,
            washroom.areas.total(),
            format_currency(washroom.execution_subtotal),
            format_currency(washroom.product_subtotal),
        );
    }
    let summary = costs.summary();
    println!("Execution total:    {}", format_currency(summary.execution_total));
    println!("Vendor total:       {}", format_currency(summary.vendor_total));
    println!("Additional total:   {}", format_currency(summary.additional_total));
    println!("Product cost:       {}", format_currency(summary.product_cost));
    println!("Logistics:          {}", format_currency(summary.logistics_cost));
    println!("Margin:             {}", format_currency(summary.margin_amount));
    println!("GST:                {}", format_currency(summary.gst_amount));
    println!("Final amount:       {}", format_currency(costs.final_quotation_amount));
    println!();
    println!("Quotation MRP total:       {}", format_currency(quotation.summary.mrp_total));
    println!(
        "Quotation special price:   {}",
        format_currency(quotation.summary.special_price_subtotal)
    );
    println!("Quotation GST:             {}", format_currency(quotation.summary.total_gst));
    println!("Quotation grand total:     {}", format_currency(quotation.total_amount));
    println!(
        "Average margin:            {:.2}%",
        quotation.pricing.summary.average_margin
    );

    if let Some(selections) = &input.estimate {
        let estimate = calculate_estimate(selections, &brands, &settings);
        println!();
        println!("Estimate total:            {}", format_currency(estimate.total));
    }

    if let Some(csv_path) = &args.csv {
        export_csv(&quotation, csv_path)?;
        println!("Exported to CSV: {}", csv_path.display());
    }

    if let Some(json_path) = &args.json {
        export_json(&quotation, json_path)?;
        println!("Exported to JSON: {}", json_path.display());
    }

    Ok(())
}
