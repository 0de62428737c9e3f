//! Перечисляемые типы данных, используемые при работе с библиотекой

use std::fmt;
use std::str;

use serde::Deserialize;

/// Имя логического типа большого символьного объекта (CLOB). Представление на стороне Rust -- [`String`].
pub const CLOB: &str = "clob";
/// Имя логического типа большого бинарного объекта (BLOB). Представление на стороне Rust -- поток
/// [`BlobReader`](../lob/struct.BlobReader.html).
pub const BLOB: &str = "blob";

/// Объявленный при связывании вид параметра.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
  /// Обычный параметр. Значение передается драйверу как есть.
  Ordinary,
  /// Большой объект. Значение проходит через реестр конвертеров и, при необходимости,
  /// загружается в базу порциями.
  LargeObject,
}
impl Default for ParamKind {
  fn default() -> Self { ParamKind::Ordinary }
}

/// Кодировка, в которой база хранит символьные большие объекты.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
  /// UTF-8. Минимальный юнит кодировки -- 1 байт.
  Utf8,
  /// UTF-16 с порядком байт little-endian. Минимальный юнит кодировки -- 2 байта, символы
  /// вне BMP занимают 2 юнита (суррогатная пара).
  Utf16,
}
impl Charset {
  /// Размер минимального юнита кодировки в байтах. Порции символьных данных, размер которых
  /// кратен данной величине, не разрезают юниты кодировки.
  #[inline]
  pub fn unit(&self) -> usize {
    match *self {
      Charset::Utf8 => 1,
      Charset::Utf16 => 2,
    }
  }
  /// Кодирует текст в байты данной кодировки.
  pub fn encode(&self, text: &str) -> Vec<u8> {
    match *self {
      Charset::Utf8 => text.as_bytes().to_vec(),
      Charset::Utf16 => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
    }
  }
  /// Получает размер текста в байтах после кодирования в данную кодировку.
  pub fn encoded_len(&self, text: &str) -> usize {
    match *self {
      Charset::Utf8 => text.len(),
      Charset::Utf16 => text.encode_utf16().count() * 2,
    }
  }
  /// Декодирует байты данной кодировки в текст. Возвращает описание проблемы, если байты
  /// не являются корректной последовательностью в данной кодировке.
  pub fn decode(&self, raw: &[u8]) -> Result<String, String> {
    match *self {
      Charset::Utf8 => str::from_utf8(raw).map(str::to_owned).map_err(|e| e.to_string()),
      Charset::Utf16 => {
        if raw.len() % 2 != 0 {
          return Err(format!("odd number of bytes ({}) in UTF-16 data", raw.len()));
        }
        let units = raw.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]]));
        char::decode_utf16(units)
          .collect::<Result<String, _>>()
          .map_err(|e| e.to_string())
      },
    }
  }
}
impl Default for Charset {
  fn default() -> Self { Charset::Utf8 }
}
impl fmt::Display for Charset {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      Charset::Utf8 => f.write_str("UTF-8"),
      Charset::Utf16 => f.write_str("UTF-16LE"),
    }
  }
}
