//! Record writer.

use super::DealRecord;

/// Format one record, one tag per line, skipping absent tags.
pub fn record_to_string(record: &DealRecord) -> String {
    let tags = [
        ("Title", &record.title),
        ("Dealer", &record.dealer),
        ("Vulnerable", &record.vulnerable),
        ("Declarer", &record.declarer),
        ("Contract", &record.contract),
        ("Deal", &record.deal),
        ("Auction", &record.auction),
        ("Play", &record.play),
        ("Result", &record.result),
    ];

    let mut output = String::new();
    for (name, value) in tags {
        if let Some(value) = value {
            output.push_str(&format!("[{} \"{}\"]\n", name, value));
        }
    }
    output
}

/// Format records separated by blank lines.
pub fn write_records(records: &[DealRecord]) -> String {
    records
        .iter()
        .map(record_to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{hearts_deal, suit_deal};
    use crate::record::read_records;

    #[test]
    fn test_record_to_string() {
        let mut record = DealRecord::from_deal(&hearts_deal());
        record.title = Some("Board 7".to_string());
        let text = record_to_string(&record);

        assert!(text.starts_with("[Title \"Board 7\"]\n[Dealer \"S\"]\n"));
        assert!(text.contains("[Contract \"4H\"]\n"));
        assert!(text.contains("[Play \"W:S2 SA S5 S9 N:DA D3 H2 DK\"]\n"));
        assert!(text.ends_with("[Result \"10\"]\n"));
    }

    #[test]
    fn test_write_then_read() {
        let deals = [hearts_deal(), suit_deal()];
        let records: Vec<DealRecord> = deals.iter().map(DealRecord::from_deal).collect();
        let text = write_records(&records);

        let read = read_records(&text).unwrap();
        assert_eq!(read.len(), 2);
        for (record, deal) in read.iter().zip(&deals) {
            assert_eq!(&record.build().unwrap(), deal);
        }
    }
}
