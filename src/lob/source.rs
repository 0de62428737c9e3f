//! Источники значений, которые связываются с параметрами выражений.
//!
//! Произвольное значение со стороны приложения ([`HostValue`]) один раз, в момент связывания,
//! классифицируется в один из трех видов источника ([`Source`]): скалярное значение, буфер в памяти
//! или поток, который можно прочитать только один раз.
use std::fmt;
use std::io;

use bytes::Bytes;

//-------------------------------------------------------------------------------------------------
/// Однопроходный поток байт, предоставляемый приложением. Поток конечен, не может быть перезапущен
/// и принадлежит тому, кто им владеет: после передачи в [`upload`](fn.upload.html) или
/// [`Binder`](../stmt/struct.Binder.html) прочитать его повторно невозможно. Если данные нужно
/// передать еще раз, приложение должно открыть новый поток.
pub struct LobStream<'a> {
  inner: Box<dyn io::Read + 'a>,
}
impl<'a> LobStream<'a> {
  /// Оборачивает любой читатель в поток большого объекта.
  #[inline]
  pub fn new<R: io::Read + 'a>(reader: R) -> Self {
    LobStream { inner: Box::new(reader) }
  }
}
impl<'a> io::Read for LobStream<'a> {
  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    self.inner.read(buf)
  }
}
impl<'a> fmt::Debug for LobStream<'a> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("LobStream").finish_non_exhaustive()
  }
}

//-------------------------------------------------------------------------------------------------
/// Скалярное значение, размер которого известен сразу.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
  /// `NULL`.
  Null,
  /// Логическое значение.
  Bool(bool),
  /// Целое число.
  Int(i64),
  /// Число с плавающей точкой.
  Float(f64),
  /// Текст.
  Text(String),
}
impl Scalar {
  /// Проверяет, является ли значение `NULL`-ом.
  #[inline]
  pub fn is_null(&self) -> bool {
    matches!(*self, Scalar::Null)
  }
  /// Получает текстовое представление значения, или `None` для `NULL`. Логические значения
  /// представляются как `"1"` и `"0"`.
  pub fn to_text(&self) -> Option<String> {
    match *self {
      Scalar::Null => None,
      Scalar::Bool(b) => Some(if b { "1" } else { "0" }.into()),
      Scalar::Int(i) => Some(i.to_string()),
      Scalar::Float(f) => Some(f.to_string()),
      Scalar::Text(ref s) => Some(s.clone()),
    }
  }
}

/// Значение, полностью находящееся в памяти: то, что получает конвертер при связывании.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
  /// Скалярное значение.
  Scalar(Scalar),
  /// Буфер байт.
  Buffer(Bytes),
}
impl Payload {
  /// Проверяет, является ли значение `NULL`-ом.
  #[inline]
  pub fn is_null(&self) -> bool {
    matches!(*self, Payload::Scalar(Scalar::Null))
  }
}

//-------------------------------------------------------------------------------------------------
/// Значение со стороны приложения, которое необходимо связать с параметром выражения.
#[derive(Debug)]
pub enum HostValue<'a> {
  /// `NULL`.
  Null,
  /// Логическое значение.
  Bool(bool),
  /// Целое число.
  Int(i64),
  /// Число с плавающей точкой.
  Float(f64),
  /// Текст.
  Text(String),
  /// Буфер байт, полностью находящийся в памяти.
  Bytes(Bytes),
  /// Поток, открытый приложением.
  Stream(LobStream<'a>),
}
impl<'a> HostValue<'a> {
  /// Создает значение из открытого приложением читателя.
  #[inline]
  pub fn stream<R: io::Read + 'a>(reader: R) -> Self {
    HostValue::Stream(LobStream::new(reader))
  }
}
impl<'a> From<bool> for HostValue<'a> {
  fn from(v: bool) -> Self { HostValue::Bool(v) }
}
macro_rules! int {
  ($($ty:ty),+) => ($(
    impl<'a> From<$ty> for HostValue<'a> {
      fn from(v: $ty) -> Self { HostValue::Int(v.into()) }
    }
  )+);
}
int!(i8, i16, i32, i64, u8, u16, u32);
impl<'a> From<f32> for HostValue<'a> {
  fn from(v: f32) -> Self { HostValue::Float(v.into()) }
}
impl<'a> From<f64> for HostValue<'a> {
  fn from(v: f64) -> Self { HostValue::Float(v) }
}
impl<'a, 's> From<&'s str> for HostValue<'a> {
  fn from(v: &'s str) -> Self { HostValue::Text(v.to_owned()) }
}
impl<'a> From<String> for HostValue<'a> {
  fn from(v: String) -> Self { HostValue::Text(v) }
}
impl<'a, 's> From<&'s [u8]> for HostValue<'a> {
  fn from(v: &'s [u8]) -> Self { HostValue::Bytes(Bytes::copy_from_slice(v)) }
}
impl<'a> From<Vec<u8>> for HostValue<'a> {
  fn from(v: Vec<u8>) -> Self { HostValue::Bytes(v.into()) }
}
impl<'a> From<Bytes> for HostValue<'a> {
  fn from(v: Bytes) -> Self { HostValue::Bytes(v) }
}
impl<'a> From<LobStream<'a>> for HostValue<'a> {
  fn from(v: LobStream<'a>) -> Self { HostValue::Stream(v) }
}
impl<'a, T: Into<HostValue<'a>>> From<Option<T>> for HostValue<'a> {
  fn from(v: Option<T>) -> Self {
    v.map_or(HostValue::Null, Into::into)
  }
}

//-------------------------------------------------------------------------------------------------
/// Нормализованный источник значения параметра.
#[derive(Debug)]
pub enum Source<'a> {
  /// Скалярное значение, размер известен сразу.
  Inline(Scalar),
  /// Буфер байт, размер известен сразу.
  Buffer(Bytes),
  /// Однопроходный поток, размер заранее неизвестен.
  Stream(LobStream<'a>),
}
impl<'a> Source<'a> {
  /// Классифицирует значение приложения. Классификация -- только анализ вида значения, никакие
  /// данные при этом не читаются.
  pub fn classify(value: HostValue<'a>) -> Self {
    match value {
      HostValue::Null => Source::Inline(Scalar::Null),
      HostValue::Bool(v) => Source::Inline(Scalar::Bool(v)),
      HostValue::Int(v) => Source::Inline(Scalar::Int(v)),
      HostValue::Float(v) => Source::Inline(Scalar::Float(v)),
      HostValue::Text(v) => Source::Inline(Scalar::Text(v)),
      HostValue::Bytes(v) => Source::Buffer(v),
      HostValue::Stream(s) => Source::Stream(s),
    }
  }
  /// Превращает источник в значение, находящееся в памяти, или возвращает поток, если источник
  /// является потоком.
  pub fn into_payload(self) -> Result<Payload, LobStream<'a>> {
    match self {
      Source::Inline(s) => Ok(Payload::Scalar(s)),
      Source::Buffer(b) => Ok(Payload::Buffer(b)),
      Source::Stream(s) => Err(s),
    }
  }
}
impl<'a> From<HostValue<'a>> for Source<'a> {
  #[inline]
  fn from(value: HostValue<'a>) -> Self {
    Source::classify(value)
  }
}
