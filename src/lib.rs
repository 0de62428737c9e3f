//! Связывание и конвертация больших объектов (LOB) для драйверов баз данных
//! ------------------------------------------------------------------------
//! Библиотека принимает значения приложения, предназначенные для столбцов `CLOB`/`BLOB` (скаляры,
//! буферы в памяти или потоки), и передает их драйверу конкретной базы, учитывая ее ограничения, а
//! извлеченные из базы ячейки превращает в канонические значения Rust: текст для `CLOB` и новый поток
//! для `BLOB`. Данные передаются байт в байт, без сжатия и перекодирования, независимо от их размера.
//!
//! Драйвер базы подключается реализацией типажа [`Statement`](stmt/trait.Statement.html).
//!
//! # Пример использования
//! ```rust
//! use std::io::Read;
//! use lobio::platform::Platform;
//! use lobio::stmt::RawCell;
//! use lobio::types::{BLOB, CLOB};
//!
//! let platform = Platform::new("memory");
//! // Ячейки в том виде, в котором их вернул драйвер
//! let clob = RawCell::from(b"test".to_vec());
//! let blob = RawCell::from(b"test".to_vec());
//!
//! let text = lobio::materialize(CLOB, &clob, &platform).unwrap().into_value();
//! assert_eq!(Some("test"), text.as_text());
//!
//! let mut reader = lobio::materialize(BLOB, &blob, &platform).unwrap().into_value().into_blob().unwrap();
//! let mut content = Vec::new();
//! reader.read_to_end(&mut content).unwrap();
//! assert_eq!(b"test".to_vec(), content);
//! ```

#![deny(missing_docs)]

pub mod convert;
pub mod error;
pub mod lob;
pub mod params;
pub mod platform;
pub mod stmt;
pub mod types;

/// Тип результата, возвращаемый всеми функциями библиотеки, которые могут привести к ошибке.
/// Библиотека никогда не генерирует панику, всегда возвращая ошибочный результат.
pub type Result<T> = std::result::Result<T, error::Error>;
/// Тип результата, возвращаемый функциями драйвера базы данных.
pub type DbResult<T> = std::result::Result<T, error::DbError>;

use convert::{Materialized, Registry};
use lob::HostValue;
use platform::Platform;
use stmt::{BindIndex, Binder, Bound, RawCell, Statement};
use types::ParamKind;

/// Связывает значение с параметром выражения, используя [глобальный реестр](convert/struct.Registry.html#method.global)
/// конвертеров и [параметры по умолчанию](params/struct.LobParams.html). Подробности см. в [`Binder::bind`].
///
/// [`Binder::bind`]: stmt/struct.Binder.html#method.bind
#[inline]
pub fn bind<'i, 'v, S, I, V>(stmt: &mut S, index: I, value: V, kind: ParamKind, logical: Option<&str>) -> Result<Bound>
  where S: Statement + ?Sized,
        I: Into<BindIndex<'i>>,
        V: Into<HostValue<'v>>,
{
  Binder::default().bind(stmt, index, value, kind, logical)
}

/// Преобразует ячейку выборки в каноническое значение логического типа, используя
/// [глобальный реестр](convert/struct.Registry.html#method.global) конвертеров. Подробности см. в
/// [`Registry::materialize`].
///
/// [`Registry::materialize`]: convert/struct.Registry.html#method.materialize
#[inline]
pub fn materialize(logical: &str, cell: &RawCell, platform: &Platform) -> Result<Materialized> {
  Registry::global().materialize(logical, cell, platform)
}
