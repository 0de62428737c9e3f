//! Содержит структуры, описывающие параметры связывания больших объектов
use std::num::NonZeroUsize;

use serde::Deserialize;

/// Размер порции потоковой загрузки по умолчанию, в байтах.
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(8192) {
  Some(size) => size,
  None => unreachable!(),
};

/// Параметры связывания больших объектов.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LobParams {
  /// Максимальное количество байт, запрашиваемое из потока-источника за одно чтение и
  /// передаваемое драйверу за один вызов дозаписи. Влияет только на производительность:
  /// любой положительный размер дает одинаковый результат в базе.
  pub chunk_size: NonZeroUsize,
}
impl LobParams {
  /// Создает параметры с указанным размером порции.
  #[inline]
  pub fn with_chunk_size(chunk_size: NonZeroUsize) -> Self {
    LobParams { chunk_size }
  }
}
impl Default for LobParams {
  fn default() -> Self {
    LobParams { chunk_size: DEFAULT_CHUNK_SIZE }
  }
}
impl From<NonZeroUsize> for LobParams {
  fn from(chunk_size: NonZeroUsize) -> Self {
    LobParams::with_chunk_size(chunk_size)
  }
}
