//! CSV report read-back

use paperfetch_pubmed::report::{HEADER, ReportOutcome, write_report};
use paperfetch_pubmed::Record;
use tempfile::TempDir;

fn records() -> Vec<Record> {
    vec![
        Record::new(
            "39000001",
            "Scalable enzyme production, revisited",
            "2024 Feb 15",
            vec!["Jane Smith".into(), "Bob Lee".into()],
            vec![
                "Acme Pharma Inc., Boston, MA, USA".into(),
                "BioWidgets GmbH, Berlin, Germany".into(),
            ],
            "jane.smith@acmepharma.com",
        ),
        Record::new("39000002", "Campus greenhouses", "2023", vec![], vec![], ""),
        Record::new(
            "39000003",
            "Line\nbreaks survive",
            "2022 Jan",
            vec!["Ann Roe".into()],
            vec!["Roe Consulting Ltd.".into()],
            "a@roe.co.uk; b@roe.co.uk",
        ),
    ]
}

#[test]
fn report_reads_back_row_per_record() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("results.csv");
    let input = records();

    let outcome = write_report(&input, &path).unwrap();
    assert_eq!(
        outcome,
        ReportOutcome::Written {
            path: path.clone(),
            rows: 3
        }
    );

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, HEADER);

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), input.len());

    for (row, record) in rows.iter().zip(&input) {
        assert_eq!(row.len(), 6);
        assert_eq!(&row[0], record.pmid());
        assert_eq!(&row[1], record.title());
        assert_eq!(&row[2], record.publication_date());
        assert_eq!(row[3].split("; ").collect::<Vec<_>>(), record.authors());
        assert_eq!(row[4].split("; ").collect::<Vec<_>>(), record.affiliations());
        assert_eq!(&row[5], record.email());
    }
}

#[test]
fn sentinels_appear_in_report() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("results.csv");
    write_report(&records()[1..2], &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(
        row.iter().collect::<Vec<_>>(),
        ["39000002", "Campus greenhouses", "2023", "N/A", "N/A", "N/A"]
    );
}
