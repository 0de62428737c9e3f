//! Содержит структуры и типажи, предназначенные для унифицированного представления индексаторов.
use std::fmt;

use super::Row;

/// Типаж, позволяющий указать типы, которые можно использовать для индексации набора ячеек, полученных из базы данных.
/// Наиболее типичное применение -- использование индекса или имени колонки для извлечения данных.
/// Благодаря типажу для этого можно использовать одну и ту же функцию [`get()`][get].
///
/// [get]: struct.Row.html#method.get
pub trait RowIndex: fmt::Display {
  /// Превращает объект в индекс, по которому можно извлечь данные, или в `None`, если нет индекса, соответствующего
  /// данному объекту. В этом случае метод [`get()`][get] вернет ошибку [`InvalidColumn`][err].
  ///
  /// [get]: struct.Row.html#method.get
  /// [err]: ../error/enum.Error.html#variant.InvalidColumn
  fn idx(&self, row: &Row) -> Option<usize>;
}

impl RowIndex for usize {
  fn idx(&self, row: &Row) -> Option<usize> {
    if *self >= row.len() {
      return None;
    }
    Some(*self)
  }
}
/// Имена столбцов сравниваются без учета регистра, т.к. разные базы по-разному приводят регистр идентификаторов.
impl<'a> RowIndex for &'a str {
  fn idx(&self, row: &Row) -> Option<usize> {
    row.names().position(|x| x.eq_ignore_ascii_case(self))
  }
}

/// Обобщенный индекс связываемых параметров. Позволяет связывать параметры как по позиции,
/// так и по имени, используя один и тот же вызов [`bind`][1], перегруженный по принимаемым аргументам.
///
/// [1]: struct.Binder.html#method.bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindIndex<'a> {
  /// Связывание осуществляется по имени переменной.
  Name(&'a str),
  /// Связывание осуществляется по позиции переменной (нумерация с 0).
  Index(usize)
}
impl<'a> fmt::Display for BindIndex<'a> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      BindIndex::Name(name) => write!(f, ":{}", name),
      BindIndex::Index(pos) => write!(f, "#{}", pos),
    }
  }
}

impl<'a> From<usize> for BindIndex<'a> {
  fn from(t: usize) -> Self {
    BindIndex::Index(t)
  }
}
impl<'a> From<&'a str> for BindIndex<'a> {
  fn from(t: &'a str) -> Self {
    BindIndex::Name(t)
  }
}
