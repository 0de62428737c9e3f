//! Содержит интерфейс драйвера базы данных, через который библиотека передает параметры выражений
//! и получает строки выборки, а также связывание параметров.
mod bind;
pub mod index;

use std::fmt;
use std::io;
use std::sync::Arc;

use bytes::Bytes;

use crate::{DbResult, Result};
use crate::convert::BindValue;
use crate::error::Error;
use crate::lob::LobPiece;
use crate::platform::Platform;

pub use self::bind::{Binder, Bound};
pub use self::index::{BindIndex, RowIndex};

//-------------------------------------------------------------------------------------------------
/// Подготовленное выражение драйвера базы данных. Библиотека не строит и не выполняет выражения,
/// а только вызывает перечисленные методы; их реализует драйвер конкретной базы.
///
/// Все вызовы блокирующие. Одно выражение не должно использоваться из нескольких потоков одновременно.
pub trait Statement {
  /// Описание особенностей базы, принадлежащее соединению, подготовившему выражение.
  fn platform(&self) -> &Platform;
  /// Связывает с параметром обычное значение.
  fn bind_value(&mut self, index: BindIndex, value: BindValue) -> DbResult<()>;
  /// Связывает с параметром большой объект, переданный целиком за один вызов.
  ///
  /// # Параметры
  /// - `logical`:
  ///   Логический тип большого объекта, например, [`CLOB`](../types/constant.CLOB.html).
  /// - `value`:
  ///   Представление значения, полученное от конвертера логического типа.
  fn bind_lob(&mut self, index: BindIndex, logical: &str, value: BindValue) -> DbResult<()>;
  /// Дописывает очередную порцию данных большого объекта, загружаемого потоково. Порции передаются
  /// строго в том порядке, в котором они прочитаны из источника.
  fn append_lob_chunk(&mut self, index: BindIndex, piece: LobPiece, chunk: &[u8]) -> DbResult<()>;
  /// Завершает потоковую загрузку и связывает загруженный объект с параметром. Если база ожидала
  /// больше данных, чем было передано, должен вернуть [`DbError::NeedData`](../error/enum.DbError.html#variant.NeedData).
  fn finalize_lob(&mut self, index: BindIndex, logical: &str) -> DbResult<()>;
  /// Отменяет незавершенную потоковую загрузку, освобождая накопленные драйвером ресурсы.
  /// По умолчанию ничего не делает.
  fn abort_lob(&mut self, index: BindIndex) -> DbResult<()> {
    let _ = index;
    Ok(())
  }
  /// Извлекает очередную строку выборки, или `None`, если строк больше нет.
  fn fetch_row(&mut self) -> DbResult<Option<Row>>;
}

//-------------------------------------------------------------------------------------------------
/// Указатель на большой объект, хранящийся в базе (или в ресурсе драйвера), из которого
/// можно многократно читать его содержимое.
pub trait LobLocator: fmt::Debug + Send + Sync {
  /// Получает размер объекта в байтах.
  fn len(&self) -> io::Result<u64>;
  /// Открывает новый поток, читающий содержимое объекта с начала.
  fn open(&self) -> io::Result<Box<dyn io::Read + Send>>;
}

/// Ячейка строки выборки в том виде, в котором ее вернул драйвер.
#[derive(Clone, Debug)]
pub enum RawCell {
  /// `NULL`.
  Null,
  /// Данные, целиком полученные в памяти.
  Inline(Bytes),
  /// Текст, уже декодированный драйвером.
  Text(String),
  /// Указатель на объект, данные которого читаются потоком.
  Locator(Arc<dyn LobLocator>),
}
impl RawCell {
  /// Создает ячейку-указатель.
  #[inline]
  pub fn locator<L: LobLocator + 'static>(locator: L) -> Self {
    RawCell::Locator(Arc::new(locator))
  }
  /// Проверяет, содержит ли ячейка `NULL`.
  #[inline]
  pub fn is_null(&self) -> bool {
    matches!(*self, RawCell::Null)
  }
  /// Проверяет, содержит ли ячейка пустой объект. Для указателей запрашивает размер у драйвера.
  pub fn is_empty(&self) -> io::Result<bool> {
    match *self {
      RawCell::Null => Ok(false),
      RawCell::Inline(ref b) => Ok(b.is_empty()),
      RawCell::Text(ref s) => Ok(s.is_empty()),
      RawCell::Locator(ref l) => l.len().map(|len| len == 0),
    }
  }
}
impl From<Bytes> for RawCell {
  fn from(v: Bytes) -> Self { RawCell::Inline(v) }
}
impl From<Vec<u8>> for RawCell {
  fn from(v: Vec<u8>) -> Self { RawCell::Inline(v.into()) }
}
impl From<String> for RawCell {
  fn from(v: String) -> Self { RawCell::Text(v) }
}
impl<'a> From<&'a str> for RawCell {
  fn from(v: &'a str) -> Self { RawCell::Text(v.to_owned()) }
}

//-------------------------------------------------------------------------------------------------
/// Строка выборки: упорядоченный набор именованных ячеек.
#[derive(Clone, Debug, Default)]
pub struct Row {
  cells: Vec<(String, RawCell)>,
}
impl Row {
  /// Создает пустую строку.
  #[inline]
  pub fn new() -> Self {
    Row::default()
  }
  /// Добавляет в конец строки ячейку с указанным именем столбца.
  pub fn push<S: Into<String>, C: Into<RawCell>>(&mut self, name: S, cell: C) {
    self.cells.push((name.into(), cell.into()));
  }
  /// Количество ячеек в строке.
  #[inline]
  pub fn len(&self) -> usize {
    self.cells.len()
  }
  /// Проверяет, что в строке нет ни одной ячейки.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }
  /// Имена столбцов в порядке их следования.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.cells.iter().map(|(name, _)| name.as_str())
  }
  /// Получает ячейку по номеру столбца (нумерация с 0) или его имени.
  ///
  /// # Ошибки
  /// Если столбца с указанным номером или именем нет, возвращает [`InvalidColumn`](../error/enum.Error.html#variant.InvalidColumn).
  pub fn get<I: RowIndex>(&self, index: I) -> Result<&RawCell> {
    match index.idx(self) {
      Some(i) => Ok(&self.cells[i].1),
      None => Err(Error::InvalidColumn(index.to_string())),
    }
  }
}
impl<S: Into<String>> FromIterator<(S, RawCell)> for Row {
  fn from_iter<T: IntoIterator<Item = (S, RawCell)>>(iter: T) -> Self {
    Row { cells: iter.into_iter().map(|(name, cell)| (name.into(), cell)).collect() }
  }
}
