// Primitives for reading eBird CSV exports.

use csv::ByteRecord;

use crate::tally::*;

/// The sightings of one export, plus the lines that could not be decoded.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct CsvSightings {
    pub rows: Vec<Sighting>,
    pub malformed: usize,
}

// Position of the interesting columns in the header. A missing column leaves
// the corresponding field empty for every row.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
struct SightingColumns {
    state: Option<usize>,
    county: Option<usize>,
    date: Option<usize>,
    species: Option<usize>,
}

impl SightingColumns {
    fn locate(header: &ByteRecord, cfs: &FileSource) -> SightingColumns {
        let find = |name: &str| header.iter().position(|h| h == name.as_bytes());
        SightingColumns {
            state: find(cfs.state_column()),
            county: find(cfs.county_column()),
            date: find(cfs.date_column()),
            species: find(cfs.species_column()),
        }
    }

    // Only the located fields are decoded. Bytes that are not UTF-8 are
    // replaced, the rest of the line is never looked at.
    fn read(&self, line: &ByteRecord) -> Sighting {
        let get = |idx: Option<usize>| {
            idx.and_then(|i| line.get(i))
                .map(|b| String::from_utf8_lossy(b).into_owned())
        };
        Sighting {
            state: get(self.state),
            county: get(self.county),
            date: get(self.date),
            species: get(self.species),
        }
    }
}

pub fn read_csv_sightings(path: &str, cfs: &FileSource) -> BTallyResult<CsvSightings> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let header = rdr.byte_headers().context(CsvHeaderSnafu { path })?.clone();
    debug!("read_csv_sightings: header: {:?}", header);

    let columns = SightingColumns::locate(&header, cfs);
    debug!("read_csv_sightings: columns: {:?}", columns);
    if columns.county.is_none() {
        warn!(
            "read_csv_sightings: {}: no {:?} column found",
            path,
            cfs.county_column()
        );
    }

    let mut res = CsvSightings::default();
    for (idx, line_r) in rdr.byte_records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        match line_r {
            Ok(line) => {
                let s = columns.read(&line);
                debug!("read_csv_sightings: lineno: {:?} row: {:?}", lineno, &s);
                res.rows.push(s);
            }
            Err(e) => {
                warn!(
                    "read_csv_sightings: {}: skipping line {}: {}",
                    path, lineno, e
                );
                res.malformed += 1;
            }
        }
    }
    info!(
        "read_csv_sightings: {}: {} rows, {} malformed lines",
        path,
        res.rows.len(),
        res.malformed
    );
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &[u8]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_columns_by_header_name() {
        let file = write_csv(
            b"Submission ID,Common Name,Taxonomic Order,County,State/Province,Date\n\
              S1,Northern Cardinal,30000,Travis,US-TX,2024-01-01\n\
              S2,Carolina Wren,26000,,US-TX,2024-01-02\n",
        );
        let res = read_csv_sightings(file.path().to_str().unwrap(), &FileSource::default())
            .unwrap();
        assert_eq!(res.malformed, 0);
        assert_eq!(
            res.rows,
            vec![
                Sighting::new("US-TX", "Travis", "2024-01-01", "30000"),
                Sighting::new("US-TX", "", "2024-01-02", "26000"),
            ]
        );
    }

    #[test]
    fn missing_columns_leave_fields_empty() {
        let file = write_csv(b"Common Name,Count\nNorthern Cardinal,2\n");
        let res = read_csv_sightings(file.path().to_str().unwrap(), &FileSource::default())
            .unwrap();
        assert_eq!(res.rows, vec![Sighting::default()]);
    }

    #[test]
    fn short_lines_are_tolerated() {
        let file = write_csv(b"County,Date,Taxonomic Order\nTravis,2024-01-01\n");
        let res = read_csv_sightings(file.path().to_str().unwrap(), &FileSource::default())
            .unwrap();
        assert_eq!(res.rows[0].county.as_deref(), Some("Travis"));
        assert_eq!(res.rows[0].species, None);
    }

    #[test]
    fn non_utf8_in_ignored_column_keeps_the_row() {
        let file = write_csv(b"County,Date,Taxonomic Order,Location\nTravis,2024-01-01,1,Ca\xf1on\n");
        let res = read_csv_sightings(file.path().to_str().unwrap(), &FileSource::default())
            .unwrap();
        assert_eq!(res.malformed, 0);
        assert_eq!(
            res.rows,
            vec![Sighting {
                state: None,
                ..Sighting::new("", "Travis", "2024-01-01", "1")
            }]
        );
    }

    #[test]
    fn non_utf8_in_county_is_replaced() {
        let file = write_csv(b"County,Date,Taxonomic Order\nA\xf1asco,2024-01-01,1\n");
        let res = read_csv_sightings(file.path().to_str().unwrap(), &FileSource::default())
            .unwrap();
        assert_eq!(res.malformed, 0);
        assert_eq!(res.rows[0].county.as_deref(), Some("A\u{FFFD}asco"));
    }

    #[test]
    fn custom_column_names() {
        let file = write_csv(b"Region,Area,Day,Taxon\nUS-OR,Lane,2024-02-01,5\n");
        let cfs = FileSource {
            state_column: Some("Region".to_string()),
            county_column: Some("Area".to_string()),
            date_column: Some("Day".to_string()),
            species_column: Some("Taxon".to_string()),
            ..FileSource::default()
        };
        let res = read_csv_sightings(file.path().to_str().unwrap(), &cfs).unwrap();
        assert_eq!(res.rows, vec![Sighting::new("US-OR", "Lane", "2024-02-01", "5")]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let res = read_csv_sightings("/nonexistent/MyEBirdData.csv", &FileSource::default());
        assert!(matches!(res.map_err(|e| *e), Err(TallyError::CsvOpen { .. })));
    }
}
