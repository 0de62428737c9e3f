//! Конвертер больших бинарных объектов: на стороне Rust представляются потоком.
use bytes::Bytes;

use crate::Result;
use crate::error::Error;
use crate::lob::{BlobReader, Payload};
use crate::platform::Platform;
use crate::stmt::RawCell;

use super::{BindValue, Converter, LobValue};

/// Конвертер логического типа [`BLOB`](../types/constant.BLOB.html).
///
/// Текст связывается байтами своего UTF-8 представления. Извлеченный объект всегда возвращается как
/// новый [`BlobReader`](../lob/struct.BlobReader.html), независимо от того, вернул драйвер данные в памяти,
/// текстом или указателем на объект.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlobConverter;

impl Converter for BlobConverter {
  fn to_bind(&self, value: Payload) -> Result<BindValue> {
    Ok(match value {
      Payload::Buffer(b) => BindValue::Bytes(b),
      Payload::Scalar(s) => s.to_text().map_or(BindValue::Null, |t| BindValue::Bytes(t.into())),
    })
  }
  fn to_host(&self, cell: &RawCell, _: &Platform) -> Result<LobValue> {
    let reader = match *cell {
      RawCell::Null => return Ok(LobValue::Null),
      // Клон разделяет память с ячейкой, данные не копируются
      RawCell::Inline(ref b) => BlobReader::from_bytes(b.clone()),
      RawCell::Text(ref s) => BlobReader::from_bytes(Bytes::copy_from_slice(s.as_bytes())),
      RawCell::Locator(ref l) => {
        let stream = l.open().map_err(Error::Fetch)?;
        BlobReader::new(stream, l.len().ok())
      },
    };
    Ok(LobValue::Blob(reader))
  }
}
