//! Содержит типы для работы с большими бинарными объектами.
use std::fmt;
use std::io;

use bytes::{Buf, Bytes};

/// Наибольший объем памяти, резервируемый [`BlobReader::into_vec`] до начала чтения.
const MAX_PREALLOC: u64 = 64 * 1024;

//-------------------------------------------------------------------------------------------------
/// Позволяет читать извлеченный из базы большой бинарный объект в потоковом режиме. Каждый вызов
/// `read` читает очередную порцию данных.
///
/// Каждое преобразование ячейки выборки создает новый читатель, поэтому объект можно прочитать
/// столько раз, сколько раз была преобразована ячейка. Полное чтение читателя воспроизводит
/// содержимое объекта байт в байт, независимо от того, в каком виде драйвер вернул ячейку.
pub struct BlobReader {
  inner: Box<dyn io::Read + Send>,
  /// Размер объекта в байтах, если он известен.
  len: Option<u64>,
}
impl BlobReader {
  /// Создает читателя поверх потока драйвера.
  ///
  /// # Параметры
  /// - `reader`:
  ///   Поток, читающий содержимое объекта с начала.
  /// - `len`:
  ///   Размер объекта, если драйвер его сообщил.
  #[inline]
  pub fn new<R: io::Read + Send + 'static>(reader: R, len: Option<u64>) -> Self {
    BlobReader { inner: Box::new(reader), len }
  }
  /// Создает читателя объекта, целиком полученного из базы в памяти. Данные не копируются.
  #[inline]
  pub fn from_bytes(bytes: Bytes) -> Self {
    let len = Some(bytes.len() as u64);
    BlobReader { inner: Box::new(bytes.reader()), len }
  }
  /// Получает размер объекта в байтах, если он известен без чтения.
  #[inline]
  pub fn len_hint(&self) -> Option<u64> {
    self.len
  }
  /// Читает объект до конца и возвращает его содержимое.
  pub fn into_vec(mut self) -> io::Result<Vec<u8>> {
    // Размер сообщает драйвер, поэтому заранее резервируется не больше MAX_PREALLOC
    let capacity = self.len.map_or(0, |len| len.min(MAX_PREALLOC)) as usize;
    let mut buf = Vec::with_capacity(capacity);
    io::Read::read_to_end(&mut self, &mut buf)?;
    Ok(buf)
  }
}
impl io::Read for BlobReader {
  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    self.inner.read(buf)
  }
}
impl fmt::Debug for BlobReader {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("BlobReader").field("len", &self.len).finish_non_exhaustive()
  }
}
