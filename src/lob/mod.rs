//! Содержит типы для работы с большими объектами: источники значений для связывания, потоковую
//! загрузку и читателей извлеченных объектов.

mod blob;
pub mod clob;
mod source;
mod upload;

pub use self::blob::BlobReader;
pub use self::source::{HostValue, LobStream, Payload, Scalar, Source};
pub use self::upload::{upload, LobPiece, Uploaded};
