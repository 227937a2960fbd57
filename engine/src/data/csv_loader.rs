use csv::{ReaderBuilder, StringRecord};
use mission_shared::models::MissionRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{EngineError, Result};

pub const COL_ORGANISATION: &str = "Organisation";
pub const COL_LOCATION: &str = "Location";
pub const COL_DATE: &str = "Date";
pub const COL_DETAIL: &str = "Detail";
pub const COL_ROCKET_STATUS: &str = "Rocket_Status";
pub const COL_PRICE: &str = "Price";
pub const COL_MISSION_STATUS: &str = "Mission_Status";

// Positions of the columns we read, resolved once from the header row.
struct ColumnIndex {
    organisation: usize,
    location: usize,
    date: usize,
    detail: usize,
    rocket_status: usize,
    price: usize,
    mission_status: usize,
}

pub struct MissionCsvLoader;

impl MissionCsvLoader {
    // CSV Header: Unnamed: 0.1,Unnamed: 0,Organisation,Location,Date,Detail,Rocket_Status,Price,Mission_Status
    // Example Row: 0,0,SpaceX,"LC-39A, Kennedy Space Center, Florida, USA","Fri Aug 07, 2020 05:12 UTC",Falcon 9 Block 5 | Starlink V1 L9 & BlackSky,StatusActive,50.0,Success
    pub fn load_records_from_csv(file_path: &Path) -> Result<Vec<MissionRecord>> {
        let file = File::open(file_path)?;
        tracing::info!(path = %file_path.display(), "Loading mission launches");
        Self::load_records_from_reader(BufReader::new(file))
    }

    /// Reads every row into a `MissionRecord`. Blank cells become empty strings
    /// (or `None` for the price) and are judged later during enrichment; only a
    /// missing column or a malformed CSV stream fails the load. Columns other
    /// than the seven named ones, such as leftover index columns, are not read.
    pub fn load_records_from_reader<R: Read>(reader: R) -> Result<Vec<MissionRecord>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let columns = Self::resolve_columns(&headers)?;

        let mut records = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| {
                EngineError::CsvDataFormatError(format!("Error reading CSV record at line {}: {}", idx + 2, e))
            })?;

            let price = Self::field(&record, columns.price);
            records.push(MissionRecord {
                organisation: Self::field(&record, columns.organisation).to_string(),
                location: Self::field(&record, columns.location).to_string(),
                date: Self::field(&record, columns.date).to_string(),
                detail: Self::field(&record, columns.detail).to_string(),
                rocket_status: Self::field(&record, columns.rocket_status).to_string(),
                price: (!price.trim().is_empty()).then(|| price.to_string()),
                mission_status: Self::field(&record, columns.mission_status).to_string(),
            });
        }

        tracing::info!(count = records.len(), "Loaded mission records");
        Ok(records)
    }

    fn resolve_columns(headers: &StringRecord) -> Result<ColumnIndex> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| EngineError::CsvDataFormatError(format!("Missing '{}' column in CSV header", name)))
        };

        Ok(ColumnIndex {
            organisation: find(COL_ORGANISATION)?,
            location: find(COL_LOCATION)?,
            date: find(COL_DATE)?,
            detail: find(COL_DETAIL)?,
            rocket_status: find(COL_ROCKET_STATUS)?,
            price: find(COL_PRICE)?,
            mission_status: find(COL_MISSION_STATUS)?,
        })
    }

    // Short rows are tolerated; absent trailing cells read as blank.
    fn field(record: &StringRecord, pos: usize) -> &str {
        record.get(pos).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Unnamed: 0.1,Unnamed: 0,Organisation,Location,Date,Detail,Rocket_Status,Price,Mission_Status";

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_records_valid_data() {
        let csv_content = format!(
            "{}\n{}\n{}",
            HEADER,
            r#"0,0,SpaceX,"LC-39A, Kennedy Space Center, Florida, USA","Fri Aug 07, 2020 05:12 UTC",Falcon 9 Block 5 | Starlink V1 L9,StatusActive,50.0,Success"#,
            r#"1,1,RVSN USSR,"Site 1/5, Baikonur Cosmodrome, Kazakhstan","Fri Oct 04, 1957 19:28 UTC",Sputnik 8K71PS | Sputnik-1,StatusRetired,,Success"#,
        );
        let tmp_file = create_test_csv(&csv_content);
        let records = MissionCsvLoader::load_records_from_csv(tmp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].organisation, "SpaceX");
        assert_eq!(records[0].location, "LC-39A, Kennedy Space Center, Florida, USA");
        assert_eq!(records[0].date, "Fri Aug 07, 2020 05:12 UTC");
        assert_eq!(records[0].price.as_deref(), Some("50.0"));
        assert_eq!(records[0].rocket_status, "StatusActive");

        assert_eq!(records[1].organisation, "RVSN USSR");
        assert_eq!(records[1].price, None);
        assert_eq!(records[1].mission_status, "Success");
    }

    #[test]
    fn test_load_records_column_order_independent() {
        let csv_content = "\
Mission_Status,Price,Rocket_Status,Detail,Date,Location,Organisation
Failure,\"5,000.0\",StatusActive,Energia | Buran,\"Tue Nov 15, 1988 03:00 UTC\",\"Site 110/37, Baikonur Cosmodrome, Kazakhstan\",RVSN USSR";
        let records = MissionCsvLoader::load_records_from_reader(csv_content.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].organisation, "RVSN USSR");
        assert_eq!(records[0].price.as_deref(), Some("5,000.0"));
        assert_eq!(records[0].mission_status, "Failure");
    }

    #[test]
    fn test_load_records_empty_file() {
        let tmp_file = create_test_csv(HEADER); // Only header
        let records = MissionCsvLoader::load_records_from_csv(tmp_file.path()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_records_missing_column() {
        let csv_content = "\
Organisation,Location,Date,Detail,Rocket_Status,Price
SpaceX,USA,\"Fri Aug 07, 2020 05:12 UTC\",Falcon 9,StatusActive,50.0"; // Missing Mission_Status
        let result = MissionCsvLoader::load_records_from_reader(csv_content.as_bytes());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Missing 'Mission_Status' column"));
    }

    #[test]
    fn test_load_records_blank_required_cell_is_kept() {
        let csv_content = "\
Organisation,Location,Date,Detail,Rocket_Status,Price,Mission_Status
SpaceX,\"Cape Canaveral, USA\",,Falcon 9,StatusActive,,Success";
        let records = MissionCsvLoader::load_records_from_reader(csv_content.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "");
        assert_eq!(records[0].price, None);
    }

    #[test]
    fn test_load_records_missing_file() {
        let result = MissionCsvLoader::load_records_from_csv(Path::new("/nonexistent/mission_launches.csv"));
        assert!(matches!(result, Err(EngineError::IoError { .. })));
    }
}
