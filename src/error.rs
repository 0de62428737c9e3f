//! Виды ошибок, которые могут генерироваться библиотекой.

use std::fmt;
use std::io;

/// Информация об одной ошибке/предупреждении драйвера базы данных.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Info {
  /// Код ошибки, специфичный для драйвера (например, `ORA-xxxxx` или `SQLSTATE`).
  pub code: isize,
  /// Сообщение драйвера об ошибке.
  pub message: String,
}
impl Info {
  /// Создает описание ошибки с указанным кодом и сообщением.
  pub fn new<S: Into<String>>(code: isize, message: S) -> Self {
    Info { code, message: message.into() }
  }
}
impl fmt::Display for Info {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "[{}] {}", self.code, self.message)
  }
}

/// Ошибки, возникающие при вызове функций драйвера базы данных.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DbError {
  /// Драйвер исчерпал все предоставленные ему данные и ему требуется еще. При завершении
  /// потоковой загрузки большого объекта означает, что источник выдал меньше данных, чем
  /// ожидала база.
  #[error("backend needs more data to continue")]
  NeedData,
  /// Вызов функции получения данных не вернул никаких данных.
  #[error("no data")]
  NoData,
  /// Ошибка вызова одной из функций драйвера. Содержит код и сообщение об ошибке.
  #[error("backend fault: {0}")]
  Fault(Info),
}

/// Ошибка, которую может вернуть библиотека. Включает ошибки взаимодействия с базой данных,
/// ошибки чтения источников и ошибки конвертации значений.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// Для запрошенного логического типа не зарегистрирован конвертер.
  #[error("no conversion registered for logical type `{0}`")]
  UnsupportedConversion(String),
  /// Значение не может быть представлено указанным логическим типом.
  #[error("can't convert value to/from logical type `{logical}`: {reason}")]
  Conversion {
    /// Логический тип, в который (или из которого) выполнялось преобразование.
    logical: String,
    /// Причина, по которой преобразование невозможно.
    reason: String,
  },
  /// Ошибка чтения потока-источника во время потоковой загрузки. Выражение после этой
  /// ошибки выполнять нельзя.
  #[error("failed to read large object source: {0}")]
  SourceReadFailure(#[source] io::Error),
  /// База ожидала больше данных, чем смог предоставить источник.
  #[error("backend expected more data for parameter {index} than the source supplied ({supplied} bytes)")]
  SourceExhausted {
    /// Индекс или имя параметра, при загрузке которого произошла ошибка.
    index: String,
    /// Количество байт, переданное в базу до возникновения ошибки.
    supplied: u64,
  },
  /// Драйвер вернул ошибку. Ошибка передается как есть, без повторных попыток.
  #[error("backend rejected the call: {0}")]
  BackendRejected(#[from] DbError),
  /// Ошибка чтения извлеченного из базы большого объекта.
  #[error("failed to read fetched large object: {0}")]
  Fetch(#[source] io::Error),
  /// Возникает при получении ячейки из строки выборки, если столбца с указанным индексом
  /// или именем в ней нет.
  #[error("nonexisting column `{0}`")]
  InvalidColumn(String),
  /// Попытка повторно установить глобальный реестр конвертеров.
  #[error("conversion registry is already installed")]
  RegistryInstalled,
}
impl Error {
  /// Создает ошибку конвертации для указанного логического типа.
  pub fn conversion<L, R>(logical: L, reason: R) -> Self
    where L: Into<String>,
          R: fmt::Display,
  {
    Error::Conversion { logical: logical.into(), reason: reason.to_string() }
  }
}

/// Предупреждения, которые не прерывают операцию, но сопровождают ее результат.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Warning {
  /// База не различает `NULL` и пустой большой объект, поэтому полученное значение
  /// (`NULL` или пустое) может означать любое из них.
  NullAmbiguity,
}
impl fmt::Display for Warning {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      Warning::NullAmbiguity => f.write_str("backend can't distinguish NULL from empty large object"),
    }
  }
}
