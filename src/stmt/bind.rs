//! Связывание значений приложения с параметрами выражений.
use std::io::Read;

use bytes::Buf;

use crate::Result;
use crate::convert::{BindValue, Registry};
use crate::error::Error;
use crate::lob::{upload, HostValue, LobStream, Source, Uploaded};
use crate::params::LobParams;
use crate::types::{ParamKind, BLOB};

use super::{BindIndex, Statement};

/// Способ, которым значение было передано драйверу.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
  /// Обычным параметром.
  Value,
  /// Большим объектом за один вызов.
  Lob,
  /// Большим объектом, загруженным порциями.
  Chunked(Uploaded),
}

//-------------------------------------------------------------------------------------------------
/// Связывает значения приложения с параметрами выражений, выбирая для больших объектов способ
/// передачи в зависимости от вида значения и возможностей базы.
#[derive(Debug, Clone, Copy)]
pub struct Binder<'r> {
  /// Реестр, в котором ищутся конвертеры логических типов.
  registry: &'r Registry,
  /// Параметры потоковой загрузки.
  params: LobParams,
}
impl<'r> Binder<'r> {
  /// Создает связыватель, использующий указанный реестр конвертеров и параметры.
  #[inline]
  pub fn new(registry: &'r Registry, params: LobParams) -> Self {
    Binder { registry, params }
  }

  /// Связывает значение с параметром выражения.
  ///
  /// Обычный параметр ([`ParamKind::Ordinary`]) передается драйверу без изменений. Поток, переданный
  /// как обычный параметр, читается целиком и передается байтами.
  ///
  /// Большой объект ([`ParamKind::LargeObject`]) преобразуется конвертером логического типа `logical`
  /// (по умолчанию [`BLOB`]):
  /// - скаляр или буфер передается драйверу одним вызовом, если база допускает параметр такого размера,
  ///   иначе загружается порциями;
  /// - поток никогда не читается в память целиком и всегда загружается порциями. Поток поглощается.
  ///
  /// # Параметры
  /// - `index`:
  ///   Порядковый номер (нумерация с 0) или символьное имя параметра в выражении.
  /// - `value`:
  ///   Связываемое значение.
  /// - `kind`:
  ///   Объявленный вид параметра.
  /// - `logical`:
  ///   Логический тип большого объекта. Для обычных параметров игнорируется.
  ///
  /// # Ошибки
  /// - [`UnsupportedConversion`]: для логического типа не зарегистрирован конвертер. Драйвер при этом
  ///   не вызывается.
  /// - [`Conversion`]: значение не представимо логическим типом.
  /// - [`SourceReadFailure`], [`SourceExhausted`]: см. [`upload`].
  /// - [`BackendRejected`]: драйвер вернул ошибку. Повторные попытки не делаются.
  ///
  /// При любой ошибке выражение выполнять нельзя.
  ///
  /// [`ParamKind::Ordinary`]: ../types/enum.ParamKind.html#variant.Ordinary
  /// [`ParamKind::LargeObject`]: ../types/enum.ParamKind.html#variant.LargeObject
  /// [`BLOB`]: ../types/constant.BLOB.html
  /// [`UnsupportedConversion`]: ../error/enum.Error.html#variant.UnsupportedConversion
  /// [`Conversion`]: ../error/enum.Error.html#variant.Conversion
  /// [`SourceReadFailure`]: ../error/enum.Error.html#variant.SourceReadFailure
  /// [`SourceExhausted`]: ../error/enum.Error.html#variant.SourceExhausted
  /// [`BackendRejected`]: ../error/enum.Error.html#variant.BackendRejected
  /// [`upload`]: ../lob/fn.upload.html
  pub fn bind<'i, 'v, S, I, V>(&self, stmt: &mut S, index: I, value: V, kind: ParamKind, logical: Option<&str>) -> Result<Bound>
    where S: Statement + ?Sized,
          I: Into<BindIndex<'i>>,
          V: Into<HostValue<'v>>,
  {
    let index = index.into();
    let source = Source::classify(value.into());

    match kind {
      ParamKind::Ordinary => self.bind_ordinary(stmt, index, source),
      ParamKind::LargeObject => self.bind_lob(stmt, index, source, logical.unwrap_or(BLOB)),
    }
  }

  fn bind_ordinary<S>(&self, stmt: &mut S, index: BindIndex, source: Source) -> Result<Bound>
    where S: Statement + ?Sized
  {
    let value = match source.into_payload() {
      Ok(payload) => BindValue::from(payload),
      Err(mut stream) => {
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).map_err(Error::SourceReadFailure)?;
        BindValue::Bytes(buf.into())
      },
    };
    tracing::debug!(index = %index, "binding ordinary parameter");
    stmt.bind_value(index, value)?;
    Ok(Bound::Value)
  }

  fn bind_lob<S>(&self, stmt: &mut S, index: BindIndex, source: Source, logical: &str) -> Result<Bound>
    where S: Statement + ?Sized
  {
    let converter = self.registry.lookup(logical)?;
    // Все, что нужно от описания базы, извлекаем заранее, т.к. дальше выражение заимствуется изменяемо
    let (chunk_size, charset) = {
      let platform = stmt.platform();
      (converter.chunk_size(self.params.chunk_size, platform), platform.charset())
    };

    let payload = match source.into_payload() {
      Ok(payload) => payload,
      Err(stream) => {
        tracing::debug!(index = %index, logical, chunk_size = chunk_size.get(), "binding large object stream in chunks");
        return upload(stmt, index, logical, stream, chunk_size).map(Bound::Chunked);
      },
    };
    let value = converter.to_bind(payload)?;
    let fits = value.lob_len(charset).map_or(true, |len| stmt.platform().fits_inline(len));
    let value = if fits { value } else {
      match value.into_lob_bytes(charset) {
        Ok(bytes) => {
          tracing::debug!(index = %index, logical, len = bytes.len(), chunk_size = chunk_size.get(), "large object exceeds inline limit, binding in chunks");
          let stream = LobStream::new(bytes.reader());
          return upload(stmt, index, logical, stream, chunk_size).map(Bound::Chunked);
        },
        Err(value) => value,
      }
    };
    tracing::debug!(index = %index, logical, "binding large object inline");
    stmt.bind_lob(index, logical, value)?;
    Ok(Bound::Lob)
  }
}
impl Default for Binder<'static> {
  /// Создает связыватель, использующий глобальный реестр конвертеров и параметры по умолчанию.
  fn default() -> Self {
    Binder::new(Registry::global(), LobParams::default())
  }
}
