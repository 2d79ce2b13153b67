mod export_service;
mod inventory_service;

pub use export_service::{csv_record, export_filename, ExportService, CSV_HEADER};
pub use inventory_service::InventoryService;
