//! Содержит код для преобразования между значениями Rust и представлениями больших объектов в базе данных.
//!
//! Каждому логическому типу (например, [`CLOB`] или [`BLOB`]) в [реестре](struct.Registry.html) соответствует
//! [конвертер](trait.Converter.html) -- пара преобразований: значение приложения в представление для связывания
//! и ячейка выборки в каноническое значение Rust. Новые логические типы регистрируются без изменения кода
//! связывания и извлечения.
//!
//! [`CLOB`]: ../types/constant.CLOB.html
//! [`BLOB`]: ../types/constant.BLOB.html

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Arc, OnceLock};

use bytes::Bytes;

use crate::Result;
use crate::error::Error;
use crate::lob::{Payload, Scalar};
use crate::platform::Platform;
use crate::stmt::RawCell;
use crate::types::{Charset, BLOB, CLOB};

pub use self::blob::BlobConverter;
pub use self::clob::ClobConverter;
pub use self::fetch::{LobValue, Materialized};

mod blob;
mod clob;
mod fetch;

/// Преобразует логический тип большого объекта в обе стороны.
///
/// Конвертеры регистрируются один раз при старте и затем только читаются, в том числе одновременно
/// из нескольких потоков, поэтому должны быть `Send + Sync` и не иметь изменяемого состояния.
pub trait Converter: fmt::Debug + Send + Sync {
  /// Преобразует значение приложения в представление, которое можно передать драйверу одним параметром.
  /// Для любого значения `v`, представимого данным логическим типом, `to_host` от результата связывания
  /// должен давать значение, равное `v`.
  fn to_bind(&self, value: Payload) -> Result<BindValue>;
  /// Преобразует ячейку выборки, не являющуюся `NULL`-ом, в каноническое значение Rust.
  ///
  /// # Параметры
  /// - `cell`:
  ///   Ячейка в том виде, в котором ее вернул драйвер.
  /// - `platform`:
  ///   Описание особенностей базы, из которой получена ячейка.
  fn to_host(&self, cell: &RawCell, platform: &Platform) -> Result<LobValue>;
  /// Получает размер порции потоковой загрузки для данного логического типа. По умолчанию
  /// используется запрошенный размер.
  fn chunk_size(&self, requested: NonZeroUsize, platform: &Platform) -> NonZeroUsize {
    let _ = platform;
    requested
  }
}

//-------------------------------------------------------------------------------------------------
/// Представление значения, передаваемое драйверу при связывании.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
  /// `NULL`.
  Null,
  /// Логическое значение.
  Bool(bool),
  /// Целое число.
  Int(i64),
  /// Число с плавающей точкой.
  Float(f64),
  /// Текст. Перекодирование в кодировку базы выполняет драйвер.
  Text(String),
  /// Байты.
  Bytes(Bytes),
}
impl BindValue {
  /// Получает размер данных большого объекта в байтах после кодирования в указанную кодировку,
  /// или `None`, если значение не является текстом или байтами.
  pub fn lob_len(&self, charset: Charset) -> Option<usize> {
    match *self {
      BindValue::Text(ref s) => Some(charset.encoded_len(s)),
      BindValue::Bytes(ref b) => Some(b.len()),
      _ => None,
    }
  }
  /// Превращает текст или байты в байты, готовые к потоковой загрузке. Текст кодируется в кодировку
  /// базы. Остальные значения возвращаются без изменений в качестве ошибки.
  pub fn into_lob_bytes(self, charset: Charset) -> std::result::Result<Bytes, Self> {
    match self {
      BindValue::Text(s) => Ok(match charset {
        Charset::Utf8 => Bytes::from(s.into_bytes()),
        other => Bytes::from(other.encode(&s)),
      }),
      BindValue::Bytes(b) => Ok(b),
      other => Err(other),
    }
  }
}
impl From<Scalar> for BindValue {
  fn from(value: Scalar) -> Self {
    match value {
      Scalar::Null => BindValue::Null,
      Scalar::Bool(v) => BindValue::Bool(v),
      Scalar::Int(v) => BindValue::Int(v),
      Scalar::Float(v) => BindValue::Float(v),
      Scalar::Text(v) => BindValue::Text(v),
    }
  }
}
impl From<Payload> for BindValue {
  /// Преобразует значение без изменений: скаляры -- в соответствующие скаляры, буфер -- в байты.
  fn from(value: Payload) -> Self {
    match value {
      Payload::Scalar(s) => s.into(),
      Payload::Buffer(b) => BindValue::Bytes(b),
    }
  }
}

//-------------------------------------------------------------------------------------------------
static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Реестр конвертеров: неизменяемое отображение имени логического типа в конвертер. Собирается
/// один раз через [`RegistryBuilder`](struct.RegistryBuilder.html) и после этого только читается,
/// поэтому может использоваться из нескольких потоков без синхронизации.
#[derive(Clone)]
pub struct Registry {
  entries: HashMap<String, Arc<dyn Converter>>,
}
impl Registry {
  /// Создает построитель пустого реестра.
  #[inline]
  pub fn builder() -> RegistryBuilder {
    RegistryBuilder { entries: HashMap::new() }
  }
  /// Получает конвертер для указанного логического типа.
  ///
  /// # Ошибки
  /// Если для типа не зарегистрирован конвертер, возвращает [`UnsupportedConversion`](../error/enum.Error.html#variant.UnsupportedConversion).
  pub fn lookup(&self, logical: &str) -> Result<&dyn Converter> {
    self.entries.get(logical)
      .map(|c| c.as_ref())
      .ok_or_else(|| Error::UnsupportedConversion(logical.to_owned()))
  }
  /// Проверяет, зарегистрирован ли конвертер для указанного логического типа.
  #[inline]
  pub fn contains(&self, logical: &str) -> bool {
    self.entries.contains_key(logical)
  }
  /// Имена всех зарегистрированных логических типов в произвольном порядке.
  pub fn logical_types(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }

  /// Получает глобальный реестр процесса. Если реестр не был установлен вызовом [`install`](#method.install),
  /// при первом обращении устанавливается реестр со встроенными типами.
  pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::default)
  }
  /// Устанавливает глобальный реестр процесса. Должно вызываться при старте приложения, до первого
  /// обращения к [`global`](#method.global).
  ///
  /// # Ошибки
  /// Если глобальный реестр уже установлен (явно или первым обращением к нему), возвращает
  /// [`RegistryInstalled`](../error/enum.Error.html#variant.RegistryInstalled).
  pub fn install(registry: Registry) -> Result<()> {
    GLOBAL.set(registry).map_err(|_| Error::RegistryInstalled)
  }
}
impl Default for Registry {
  /// Создает реестр, содержащий только встроенные логические типы [`CLOB`] и [`BLOB`].
  ///
  /// [`CLOB`]: ../types/constant.CLOB.html
  /// [`BLOB`]: ../types/constant.BLOB.html
  fn default() -> Self {
    Registry::builder().with_builtins().build()
  }
}
impl fmt::Debug for Registry {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_map().entries(self.entries.iter()).finish()
  }
}

/// Построитель [реестра конвертеров](struct.Registry.html).
#[derive(Debug)]
pub struct RegistryBuilder {
  entries: HashMap<String, Arc<dyn Converter>>,
}
impl RegistryBuilder {
  /// Регистрирует встроенные логические типы [`CLOB`] и [`BLOB`].
  ///
  /// [`CLOB`]: ../types/constant.CLOB.html
  /// [`BLOB`]: ../types/constant.BLOB.html
  pub fn with_builtins(self) -> Self {
    self.register(CLOB, ClobConverter)
        .register(BLOB, BlobConverter)
  }
  /// Регистрирует конвертер для логического типа. Повторная регистрация того же имени заменяет конвертер.
  pub fn register<S, C>(mut self, logical: S, converter: C) -> Self
    where S: Into<String>,
          C: Converter + 'static,
  {
    let logical = logical.into();
    if self.entries.insert(logical.clone(), Arc::new(converter)).is_some() {
      tracing::debug!(logical = %logical, "converter replaced");
    }
    self
  }
  /// Завершает построение. После этого реестр не может быть изменен.
  #[inline]
  pub fn build(self) -> Registry {
    Registry { entries: self.entries }
  }
}
