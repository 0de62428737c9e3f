//! Преобразование извлеченных из базы ячеек больших объектов в канонические значения Rust.
use crate::Result;
use crate::error::Warning;
use crate::lob::BlobReader;
use crate::platform::Platform;
use crate::stmt::{RawCell, Row};

use super::Registry;

/// Каноническое значение большого объекта на стороне Rust.
#[derive(Debug)]
pub enum LobValue {
  /// `NULL`.
  Null,
  /// Символьный объект.
  Text(String),
  /// Бинарный объект, читаемый потоком.
  Blob(BlobReader),
}
impl LobValue {
  /// Проверяет, является ли значение `NULL`-ом.
  #[inline]
  pub fn is_null(&self) -> bool {
    matches!(*self, LobValue::Null)
  }
  /// Получает текст символьного объекта.
  #[inline]
  pub fn as_text(&self) -> Option<&str> {
    match *self {
      LobValue::Text(ref s) => Some(s),
      _ => None,
    }
  }
  /// Превращает значение в текст, если это символьный объект.
  #[inline]
  pub fn into_text(self) -> Option<String> {
    match self {
      LobValue::Text(s) => Some(s),
      _ => None,
    }
  }
  /// Превращает значение в поток, если это бинарный объект.
  #[inline]
  pub fn into_blob(self) -> Option<BlobReader> {
    match self {
      LobValue::Blob(r) => Some(r),
      _ => None,
    }
  }
}

/// Результат преобразования ячейки: значение и, возможно, предупреждение о том, как его следует
/// интерпретировать.
#[derive(Debug)]
pub struct Materialized {
  /// Полученное значение.
  pub value: LobValue,
  /// Предупреждение, сопровождающее значение. Например, [`NullAmbiguity`](../error/enum.Warning.html#variant.NullAmbiguity)
  /// означает, что `NULL` и пустое значение в данной базе неразличимы, и выбор между ними
  /// остается за приложением.
  pub warning: Option<Warning>,
}
impl Materialized {
  /// Отбрасывает предупреждение и возвращает значение.
  #[inline]
  pub fn into_value(self) -> LobValue {
    self.value
  }
}

impl Registry {
  /// Преобразует ячейку выборки в каноническое значение логического типа: текст для [`CLOB`],
  /// новый поток для [`BLOB`]. Данные не усекаются, независимо от размера объекта.
  ///
  /// Ячейка не изменяется, поэтому повторное преобразование той же ячейки дает равное значение.
  ///
  /// `NULL` всегда преобразуется в [`LobValue::Null`], а не в пустое значение. Если база не различает
  /// `NULL` и пустой объект, то `NULL` и пустые значения возвращаются как есть, но с предупреждением
  /// [`NullAmbiguity`].
  ///
  /// # Ошибки
  /// - [`UnsupportedConversion`]: для логического типа не зарегистрирован конвертер. Ячейка при этом
  ///   не читается.
  /// - [`Conversion`]: данные ячейки не представимы логическим типом.
  /// - [`Fetch`]: ошибка чтения объекта из базы.
  ///
  /// [`CLOB`]: ../types/constant.CLOB.html
  /// [`BLOB`]: ../types/constant.BLOB.html
  /// [`LobValue::Null`]: enum.LobValue.html#variant.Null
  /// [`NullAmbiguity`]: ../error/enum.Warning.html#variant.NullAmbiguity
  /// [`UnsupportedConversion`]: ../error/enum.Error.html#variant.UnsupportedConversion
  /// [`Conversion`]: ../error/enum.Error.html#variant.Conversion
  /// [`Fetch`]: ../error/enum.Error.html#variant.Fetch
  pub fn materialize(&self, logical: &str, cell: &RawCell, platform: &Platform) -> Result<Materialized> {
    let converter = self.lookup(logical)?;

    let warning = if !platform.distinguishes_null_lob() && (cell.is_null() || known_empty(cell)) {
      tracing::warn!(logical, platform = platform.name(), null = cell.is_null(), "NULL and empty large object are indistinguishable");
      Some(Warning::NullAmbiguity)
    } else {
      None
    };
    let value = match *cell {
      RawCell::Null => LobValue::Null,
      _ => converter.to_host(cell, platform)?,
    };
    Ok(Materialized { value, warning })
  }
  /// Преобразует несколько ячеек одной строки. Результат для каждого столбца независим: ошибка
  /// преобразования одного столбца не влияет на остальные.
  ///
  /// # Параметры
  /// - `columns`:
  ///   Пары из имени столбца и логического типа, в который его нужно преобразовать.
  ///
  /// # Возвращаемое значение
  /// Результаты в том же порядке, что и `columns`.
  pub fn materialize_row(&self, row: &Row, columns: &[(&str, &str)], platform: &Platform) -> Vec<Result<Materialized>> {
    columns.iter()
      .map(|&(name, logical)| row.get(name).and_then(|cell| self.materialize(logical, cell, platform)))
      .collect()
  }
}

/// Проверяет, что ячейка заведомо пуста. Если драйвер не смог сообщить размер объекта, пустота
/// считается неизвестной: ячейка при этом остается читаемой.
fn known_empty(cell: &RawCell) -> bool {
  match cell.is_empty() {
    Ok(empty) => empty,
    Err(e) => {
      tracing::debug!(error = %e, "large object size is unknown");
      false
    },
  }
}
