//! Shared helpers for the `pricesync` binary integration tests.
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rust_xlsxwriter::Workbook;

/// Path to the compiled `pricesync` binary.
pub fn pricesync_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    // current_exe is something like .../deps/cmd_reconcile-<hash>
    // The binary lives in the parent directory.
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("pricesync");
    path
}

/// Runs the binary with `args` and no extra environment.
pub fn run(args: &[&str]) -> Output {
    Command::new(pricesync_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run pricesync")
}

/// Writes a one-sheet workbook.
///
/// Cells that parse as a number without a leading zero are written as
/// numbers; everything else as text, so codes like `057` stay text.
pub fn write_workbook(path: &Path, sheet: &str, rows: &[&[&str]]) {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name(sheet).expect("sheet name");
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let (r, c) = (r as u32, c as u16);
            let numeric = !value.starts_with('0') || *value == "0" || value.starts_with("0.");
            match value.parse::<f64>() {
                Ok(n) if numeric => {
                    ws.write_number(r, c, n).expect("write number");
                }
                _ => {
                    ws.write_string(r, c, *value).expect("write string");
                }
            }
        }
    }
    wb.save(path).expect("save workbook");
}

/// The reference catalogue used across tests.
pub const REFERENCE: &[&[&str]] = &[
    &["Mueble", "COD", "DROGA", "MARCA", "PVP"],
    &["A1", "057", "Amoxicilina", "Bayer", "1500"],
    &["A1", "0101", "Ibuprofeno 400", "Bago", "900"],
    &["Sin mueble", "202", "Gasas", "Johnson", "300"],
    &["B2", "303", "Alcohol en gel", "Higienol", "abc"],
];

/// Price updates: one change, one within tolerance, one from zero.
pub const UPDATES: &[&[&str]] = &[
    &["Codigo", "Precio"],
    &["57", "1800"],
    &["101", "900.004"],
    &["303", "450"],
];

/// Offers: one match by name, one new product, one unpriced row.
pub const OFFERS: &[&[&str]] = &[
    &["Producto", "Precio oferta"],
    &["Gasas", "$250"],
    &["Ibuprofeno Jarabe", "950"],
    &["Vitamina C", "gratis"],
];

/// A temp dir holding `reference.xlsx`, `updates.xlsx` and `offers.xlsx`.
pub struct Fixture {
    pub dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        write_workbook(&dir.path().join("reference.xlsx"), "Stock", REFERENCE);
        write_workbook(&dir.path().join("updates.xlsx"), "Stock", UPDATES);
        write_workbook(&dir.path().join("offers.xlsx"), "Stock", OFFERS);
        Self { dir }
    }

    pub fn path(&self, name: &str) -> String {
        self.dir
            .path()
            .join(name)
            .to_str()
            .expect("utf-8 path")
            .to_owned()
    }
}
