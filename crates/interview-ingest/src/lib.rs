//! Interview Ingest — source files → structured interview records.

pub mod chunks;
pub mod file;
pub mod ingest;
pub mod pair;

pub use chunks::{index_chunks, IndexChunk};
pub use ingest::{DocumentKind, IngestReport, Ingester, InterviewRecord, ParsedDocument};
pub use pair::{group_interviews, Interview};
