use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use yeseria_data::ReferenceLoader;

/// Validate a reference workbook before handing it to the capture app.
///
/// The workbook is a directory with one CSV per sheet:
/// - Base_Produccion.csv: COD MAT, MOLDES/TURNO, PERSONAS/MOLDE
/// - Tiempo_Fallas.csv: CODIGO, PARTE MOLDE, TIEMPO (MIN), CANTIDAD KG, LINEA
/// - Operarios.csv: CÓDIGO, OPERARIO
#[derive(Parser, Debug)]
#[command(name = "yeseria-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the workbook directory
    #[arg(short, long, default_value = "base_final")]
    workbook: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("Checking workbook: {}", args.workbook.display());

    let data = ReferenceLoader::load_workbook(&args.workbook)
        .with_context(|| format!("Failed to load workbook: {}", args.workbook.display()))?;

    println!("  molds:          {}", data.mold_count());
    println!("  defect factors: {}", data.defect_factor_count());
    println!("  operators:      {}", data.operator_count());
    println!("  mold parts:     {}", data.mold_parts().join(", "));
    println!("  rework lines:   {}", data.rework_lines().join(", "));
    println!("Workbook is usable.");

    Ok(())
}
