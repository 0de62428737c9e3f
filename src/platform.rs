//! Описание особенностей конкретной базы данных, которые учитываются при конвертации больших объектов.
//!
//! Все решения, зависящие от базы, принимаются на основании [`Platform`] и конвертеров из
//! [реестра](../convert/struct.Registry.html), поэтому код связывания и извлечения не содержит
//! проверок на конкретные базы.
use serde::Deserialize;

use crate::types::Charset;

/// Способ, которым база хранит `NULL` в столбцах больших объектов.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullLob {
  /// `NULL` и пустой объект -- разные значения.
  Distinct,
  /// База не различает `NULL` и пустой объект (например, пустая строка сохраняется как `NULL`).
  Indistinct,
}
impl Default for NullLob {
  fn default() -> Self { NullLob::Distinct }
}

/// Неизменяемое описание возможностей базы данных. Принадлежит соединению и живет столько же,
/// сколько соединение; библиотека только читает его.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Platform {
  /// Имя базы данных, используется только в диагностике.
  name: String,
  /// Кодировка символьных больших объектов.
  charset: Charset,
  /// Различает ли база `NULL` и пустой большой объект.
  null_lob: NullLob,
  /// Максимальный размер в байтах, который можно передать в базу одним параметром. Большие
  /// значения загружаются порциями. `None` означает отсутствие ограничения.
  max_inline_lob: Option<usize>,
}
impl Platform {
  /// Создает описание базы с указанным именем и настройками по умолчанию: кодировка UTF-8,
  /// `NULL` отличается от пустого объекта, размер параметра не ограничен.
  pub fn new<S: Into<String>>(name: S) -> Self {
    Platform { name: name.into(), ..Default::default() }
  }
  /// Задает кодировку символьных больших объектов.
  #[inline]
  pub fn with_charset(self, charset: Charset) -> Self {
    Platform { charset, ..self }
  }
  /// Задает способ хранения `NULL` в столбцах больших объектов.
  #[inline]
  pub fn with_null_lob(self, null_lob: NullLob) -> Self {
    Platform { null_lob, ..self }
  }
  /// Задает максимальный размер параметра, передаваемого одним вызовом.
  #[inline]
  pub fn with_max_inline_lob(self, max_inline_lob: Option<usize>) -> Self {
    Platform { max_inline_lob, ..self }
  }

  /// Имя базы данных.
  #[inline]
  pub fn name(&self) -> &str {
    &self.name
  }
  /// Кодировка символьных больших объектов.
  #[inline]
  pub fn charset(&self) -> Charset {
    self.charset
  }
  /// Способ хранения `NULL` в столбцах больших объектов.
  #[inline]
  pub fn null_lob(&self) -> NullLob {
    self.null_lob
  }
  /// Возвращает `true`, если база различает `NULL` и пустой большой объект.
  #[inline]
  pub fn distinguishes_null_lob(&self) -> bool {
    self.null_lob == NullLob::Distinct
  }
  /// Максимальный размер параметра, передаваемого одним вызовом.
  #[inline]
  pub fn max_inline_lob(&self) -> Option<usize> {
    self.max_inline_lob
  }
  /// Проверяет, можно ли передать значение указанного размера одним параметром.
  #[inline]
  pub fn fits_inline(&self, len: usize) -> bool {
    self.max_inline_lob.map_or(true, |max| len <= max)
  }
}
impl Default for Platform {
  fn default() -> Self {
    Platform {
      name: "generic".into(),
      charset: Charset::default(),
      null_lob: NullLob::default(),
      max_inline_lob: None,
    }
  }
}
