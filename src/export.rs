use csv::WriterBuilder;
use eyre::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::schema::FlatTable;

/// Writes `table` as comma separated UTF-8 with a header row.
pub fn write_csv<W: Write>(table: &FlatTable, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    writer.write_record(table.schema.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// File name used for an export, e.g. `flipkart_gaming_laptop_products.csv`.
pub fn file_name(marketplace: &str, query: &str) -> String {
    let query: String = query
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{marketplace}_{query}_products.csv")
}

/// Writes `table` into `dir`, creating it if needed, and returns the path
/// written.
pub fn save(table: &FlatTable, dir: &Path, marketplace: &str, query: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(marketplace, query));
    write_csv(table, File::create(&path)?)?;
    info!(path = %path.display(), rows = table.rows().len(), "data saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FinalSchema;

    #[test]
    fn writes_header_and_quoted_rows() {
        let table = FlatTable {
            schema: FinalSchema {
                spec_keys: vec!["Color".into()],
            },
            rows: vec![vec![
                "https://x/1".into(),
                "Acme Phone (Blue, 128 GB)".into(),
                "Acme".into(),
                "1000".into(),
                "800".into(),
                "20".into(),
                "4.0".into(),
                "10".into(),
                "N/A".into(),
            ]],
        };
        let mut out = Vec::new();
        write_csv(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("URL,Title,Brand,MRP,Current Price,Discount %,Rating,Reviews,Color")
        );
        assert_eq!(
            lines.next(),
            Some(r#"https://x/1,"Acme Phone (Blue, 128 GB)",Acme,1000,800,20,4.0,10,N/A"#)
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn file_names_are_path_safe() {
        assert_eq!(file_name("amazon", " usb c/hub "), "amazon_usb_c_hub_products.csv");
    }
}
