use axum::body::{Body, Bytes};
use chrono::Utc;
use futures::TryStreamExt;
use sqlx::PgPool;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, instrument};

use crate::core::error::Result;
use crate::features::inventory::dtos::ItemFilter;
use crate::features::inventory::models::ItemRow;
use crate::features::inventory::query;

/// UTF-8 byte order mark, prepended so spreadsheet tools detect the
/// encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Fixed column set of the export, in order.
pub const CSV_HEADER: [&str; 13] = [
    "ID",
    "Name",
    "Barcode",
    "Serial Number",
    "Type",
    "Location",
    "Status",
    "Purchase Date",
    "Purchase Price",
    "Description",
    "Created By",
    "Created At",
    "Updated At",
];

/// Render one item as a CSV record. Pure, so the formatting rules are
/// testable without a database.
pub fn csv_record(row: &ItemRow) -> [String; 13] {
    [
        row.id.to_string(),
        row.name.clone(),
        row.barcode.clone(),
        row.serial_number.clone(),
        row.item_type_name.clone(),
        row.location_name.clone(),
        row.status.capitalized().to_string(),
        row.purchase_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        row.purchase_price
            .map(|p| p.to_string())
            .unwrap_or_default(),
        row.description.clone().unwrap_or_default(),
        row.created_by_name.clone(),
        row.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        row.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]
}

fn encode_record<const N: usize>(fields: &[String; N]) -> std::io::Result<Bytes> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(fields)
        .map_err(std::io::Error::other)?;
    let buf = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.into_error()))?;
    Ok(Bytes::from(buf))
}

/// Timestamped download filename, e.g.
/// `inventory-export-2026-08-29-14-03-59.csv`.
pub fn export_filename() -> String {
    Utc::now()
        .format("inventory-export-%Y-%m-%d-%H-%M-%S.csv")
        .to_string()
}

/// Service producing the streamed CSV export
#[derive(Clone)]
pub struct ExportService {
    pool: PgPool,
}

impl ExportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Stream every item matching `filter` as CSV, most recent first.
    ///
    /// Rows are fetched as a cursor and sent chunk by chunk over a channel,
    /// so memory stays bounded regardless of the export size. The first
    /// chunk carries the BOM and header row.
    #[instrument(skip(self))]
    pub fn stream_csv(&self, filter: ItemFilter) -> Body {
        let (tx, rx) = mpsc::channel::<std::io::Result<Bytes>>(16);
        let pool = self.pool.clone();

        tokio::spawn(async move {
            if let Err(err) = produce_csv(&pool, &filter, &tx).await {
                error!(error = %err, "inventory export aborted");
                let _ = tx.send(Err(std::io::Error::other(err))).await;
            }
        });

        Body::from_stream(ReceiverStream::new(rx))
    }
}

async fn produce_csv(
    pool: &PgPool,
    filter: &ItemFilter,
    tx: &mpsc::Sender<std::io::Result<Bytes>>,
) -> anyhow::Result<()> {
    let mut head = Vec::with_capacity(UTF8_BOM.len());
    head.extend_from_slice(UTF8_BOM);
    let header_fields: [String; 13] = CSV_HEADER.map(String::from);
    head.extend_from_slice(&encode_record(&header_fields)?);
    if tx.send(Ok(Bytes::from(head))).await.is_err() {
        // Client went away before the first byte
        return Ok(());
    }

    let mut qb = query::build_export_query(filter);
    let mut rows = qb.build_query_as::<ItemRow>().fetch(pool);

    while let Some(row) = rows.try_next().await? {
        let chunk = encode_record(&csv_record(&row))?;
        if tx.send(Ok(chunk)).await.is_err() {
            // Client disconnected mid-download, stop fetching
            return Ok(());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;
    use crate::features::inventory::models::ItemStatus;

    fn sample_row() -> ItemRow {
        ItemRow {
            id: 42,
            barcode: "INV-0042".to_string(),
            serial_number: "SN-9000".to_string(),
            item_type_id: 1,
            location_id: 2,
            name: "ThinkPad X1".to_string(),
            description: Some("Dent on lid".to_string()),
            custom_fields: None,
            status: ItemStatus::Maintenance,
            purchase_date: NaiveDate::from_ymd_opt(2024, 3, 15),
            purchase_price: Some(Decimal::new(129_900, 2)),
            created_by: 7,
            updated_by: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 16, 9, 30, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 4, 1, 17, 5, 59).unwrap(),
            item_type_name: "Laptop".to_string(),
            location_name: "Room 101".to_string(),
            created_by_name: "Alice".to_string(),
            updated_by_name: None,
        }
    }

    #[test]
    fn header_has_thirteen_fixed_columns() {
        assert_eq!(CSV_HEADER.len(), 13);
        assert_eq!(CSV_HEADER[0], "ID");
        assert_eq!(CSV_HEADER[12], "Updated At");
    }

    #[test]
    fn record_formats_every_column() {
        let record = csv_record(&sample_row());
        assert_eq!(
            record,
            [
                "42",
                "ThinkPad X1",
                "INV-0042",
                "SN-9000",
                "Laptop",
                "Room 101",
                "Maintenance",
                "2024-03-15",
                "1299.00",
                "Dent on lid",
                "Alice",
                "2024-03-16 09:30:00",
                "2024-04-01 17:05:59",
            ]
            .map(String::from)
        );
    }

    #[test]
    fn optional_columns_render_empty_when_absent() {
        let row = ItemRow {
            description: None,
            purchase_date: None,
            purchase_price: None,
            ..sample_row()
        };
        let record = csv_record(&row);
        assert_eq!(record[7], "");
        assert_eq!(record[8], "");
        assert_eq!(record[9], "");
    }

    #[test]
    fn fields_with_commas_and_quotes_are_escaped() {
        let row = ItemRow {
            name: "Desk, adjustable \"pro\"".to_string(),
            ..sample_row()
        };
        let bytes = encode_record(&csv_record(&row)).unwrap();
        let line = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(line.contains(r#""Desk, adjustable ""pro""""#));
    }

    #[test]
    fn filename_carries_a_timestamp() {
        let name = export_filename();
        assert!(name.starts_with("inventory-export-"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "inventory-export-2026-08-29-14-03-59.csv".len());
    }
}
