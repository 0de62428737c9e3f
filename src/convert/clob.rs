//! Конвертер больших символьных объектов: на стороне Rust представляются строкой.
use std::io::Read;
use std::num::NonZeroUsize;

use crate::Result;
use crate::error::Error;
use crate::lob::{self, Payload};
use crate::platform::Platform;
use crate::stmt::RawCell;
use crate::types::CLOB;

use super::{BindValue, Converter, LobValue};

/// Конвертер логического типа [`CLOB`](../types/constant.CLOB.html).
///
/// Числа и логические значения связываются в текстовом виде, буферы должны содержать корректный UTF-8.
/// Извлеченные данные декодируются из кодировки базы, объявленной в [`Platform`](../platform/struct.Platform.html).
#[derive(Debug, Default, Clone, Copy)]
pub struct ClobConverter;

impl Converter for ClobConverter {
  fn to_bind(&self, value: Payload) -> Result<BindValue> {
    match value {
      Payload::Scalar(s) => Ok(s.to_text().map_or(BindValue::Null, BindValue::Text)),
      Payload::Buffer(b) => String::from_utf8(b.to_vec())
        .map(BindValue::Text)
        .map_err(|e| Error::conversion(CLOB, e)),
    }
  }
  fn to_host(&self, cell: &RawCell, platform: &Platform) -> Result<LobValue> {
    let charset = platform.charset();
    let text = match *cell {
      RawCell::Null => return Ok(LobValue::Null),
      RawCell::Text(ref s) => s.clone(),
      RawCell::Inline(ref b) => charset.decode(b).map_err(|e| Error::conversion(CLOB, e))?,
      RawCell::Locator(ref l) => {
        let mut raw = Vec::new();
        l.open()
          .and_then(|mut r| r.read_to_end(&mut raw))
          .map_err(Error::Fetch)?;
        charset.decode(&raw).map_err(|e| Error::conversion(CLOB, e))?
      },
    };
    Ok(LobValue::Text(text))
  }
  fn chunk_size(&self, requested: NonZeroUsize, platform: &Platform) -> NonZeroUsize {
    lob::clob::chunk_size(requested, platform.charset())
  }
}
