//! Scout engine: HTTP clients, background execution, and export IO.
mod client;
mod clipboard;
mod engine;
mod export;
mod pages;
mod persist;
mod types;
mod wire;

pub use client::{BatchClient, ClientSettings, ReqwestClient, BATCH_PATH, EXTRACT_TEXT_PATH, GATHER_PATH};
pub use clipboard::{
    ClipboardChain, ClipboardError, ClipboardOutcome, ClipboardWriter, CommandClipboard,
    Osc52Clipboard,
};
pub use engine::EngineHandle;
pub use export::{csv_export_filename, write_csv_export, CsvExport, ExportError, CSV_FILE_PREFIX};
pub use pages::{data_url, image_mime_for};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    CompanyResult, EngineError, EngineEvent, ExtractedText, FailureKind, PageImage, PageInfo,
    PageLink, SubmissionId, SubmitError,
};
