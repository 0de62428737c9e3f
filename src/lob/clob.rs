//! Содержит функции для работы с большими символьными объектами.
use std::num::NonZeroUsize;

use crate::types::Charset;

/// Получает размер порции для потоковой загрузки символьного объекта: наибольшее число, не
/// превышающее `chunk_size` и кратное размеру юнита кодировки, но не меньше одного юнита.
/// Порции такого размера никогда не разрезают юнит кодировки.
pub fn chunk_size(chunk_size: NonZeroUsize, charset: Charset) -> NonZeroUsize {
  let unit = charset.unit();
  let aligned = (chunk_size.get() / unit).max(1) * unit;
  NonZeroUsize::new(aligned).unwrap_or(chunk_size)
}
