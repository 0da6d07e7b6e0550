//! Integration tests for loading a reference workbook from disk.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tempfile::TempDir;
use yeseria_data::{ReferenceError, ReferenceLoader};

fn write_sheet(dir: &Path, sheet: &str, contents: &str) {
    fs::write(dir.join(format!("{sheet}.csv")), contents).expect("write sheet");
}

fn full_workbook() -> TempDir {
    let dir = TempDir::new().expect("temp workbook");
    write_sheet(
        dir.path(),
        "Base_Produccion",
        "COD MAT,MOLDES/TURNO,PERSONAS/MOLDE\nM1,10,2\nM2,16,1\n",
    );
    write_sheet(
        dir.path(),
        "Tiempo_Fallas",
        "CODIGO,PARTE MOLDE,TIEMPO (MIN),CANTIDAD KG,LINEA\nP1,BASE,2,0.3,L1\nP1,TAPA,1.5,0.2,L1\n",
    );
    write_sheet(
        dir.path(),
        "Operarios",
        "CÓDIGO,OPERARIO\n007,MARIA PEREZ\n101,ANA RUIZ\n",
    );
    dir
}

#[test]
fn loads_a_complete_workbook() {
    let dir = full_workbook();

    let data = ReferenceLoader::load_workbook(dir.path()).expect("load workbook");

    assert_eq!(data.mold_count(), 2);
    assert_eq!(data.defect_factor_count(), 2);
    assert_eq!(data.operator_count(), 2);
}

#[test]
fn lookups_use_normalized_keys() {
    let dir = full_workbook();

    let data = ReferenceLoader::load_workbook(dir.path()).expect("load workbook");

    let spec = data.mold_spec(" m1 ").expect("mold M1");
    assert_eq!(spec.molds_per_shift, dec!(10));

    let factor = data.defect_factor("p1", "base").expect("factor P1/BASE");
    assert_eq!(factor.time_per_unit_minutes, dec!(2));

    let operator = data.operator("007").expect("operator 007");
    assert_eq!(operator.name, "MARIA PEREZ");
}

#[test]
fn missing_directory_is_rejected() {
    let result = ReferenceLoader::load_workbook(Path::new("no/such/workbook"));

    assert!(matches!(result, Err(ReferenceError::WorkbookMissing(_))));
}

#[test]
fn missing_sheet_is_named_in_the_error() {
    let dir = full_workbook();
    fs::remove_file(dir.path().join("Operarios.csv")).expect("remove sheet");

    match ReferenceLoader::load_workbook(dir.path()) {
        Err(ReferenceError::SheetMissing { sheet }) => assert_eq!(sheet, "Operarios"),
        other => panic!("expected SheetMissing, got {other:?}"),
    }
}

#[test]
fn malformed_sheet_halts_the_load() {
    let dir = full_workbook();
    write_sheet(
        dir.path(),
        "Base_Produccion",
        "COD MAT,MOLDES/TURNO,PERSONAS/MOLDE\nM1,not-a-number,2\n",
    );

    let result = ReferenceLoader::load_workbook(dir.path());

    assert!(matches!(result, Err(ReferenceError::Malformed { .. })));
}
