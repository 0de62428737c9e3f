//! Драйвер базы данных в памяти для тестов. Эмулирует таблицу
//! ```sql
//! create table blob_table (
//!   id        integer not null primary key,
//!   clobfield clob,
//!   blobfield blob
//! );
//! ```
#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::io;

use bytes::{Buf, Bytes};

use lobio::DbResult;
use lobio::convert::BindValue;
use lobio::error::{DbError, Info};
use lobio::lob::LobPiece;
use lobio::platform::{NullLob, Platform};
use lobio::stmt::{BindIndex, LobLocator, RawCell, Row, Statement};
use lobio::types::CLOB;

pub fn init_logging() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

/// Вызов драйвера, записанный выражением.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
  Value(String),
  Lob(String, String),
  Chunk(String, LobPiece, usize),
  Finalize(String, String),
  Abort(String),
  Fetch,
}

/// Значение, связанное с параметром.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
  Value(BindValue),
  /// Данные большого объекта в кодировке базы, `None` для `NULL`.
  Lob(Option<Bytes>),
}

/// Указатель на объект, хранящийся в памяти.
#[derive(Debug)]
pub struct MemoryLocator(pub Bytes);
impl LobLocator for MemoryLocator {
  fn len(&self) -> io::Result<u64> {
    Ok(self.0.len() as u64)
  }
  fn open(&self) -> io::Result<Box<dyn io::Read + Send>> {
    Ok(Box::new(self.0.clone().reader()))
  }
}

/// Указатель, чтение которого всегда завершается ошибкой.
#[derive(Debug)]
pub struct BrokenLocator;
impl LobLocator for BrokenLocator {
  fn len(&self) -> io::Result<u64> {
    Ok(1)
  }
  fn open(&self) -> io::Result<Box<dyn io::Read + Send>> {
    Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection lost"))
  }
}

/// Указатель, драйвер которого не умеет сообщать размер объекта.
#[derive(Debug)]
pub struct UnsizedLocator(pub Bytes);
impl LobLocator for UnsizedLocator {
  fn len(&self) -> io::Result<u64> {
    Err(io::Error::new(io::ErrorKind::Unsupported, "length is not supported"))
  }
  fn open(&self) -> io::Result<Box<dyn io::Read + Send>> {
    Ok(Box::new(self.0.clone().reader()))
  }
}

/// В каком виде драйвер возвращает ячейки больших объектов.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMode {
  Inline,
  Locator,
  /// `CLOB` возвращается текстом, `BLOB` -- в памяти.
  Text,
}

//-------------------------------------------------------------------------------------------------
#[derive(Debug)]
pub struct MemoryStatement {
  platform: Platform,
  pub calls: Vec<Call>,
  pub params: BTreeMap<String, Param>,
  pending: BTreeMap<String, Vec<u8>>,
  /// Если задано, при завершении потоковой загрузки база ожидает ровно столько байт.
  pub expected_len: Option<u64>,
  /// Если задано, все вызовы связывания завершаются ошибкой.
  pub reject: Option<Info>,
  rows: VecDeque<Row>,
}
impl MemoryStatement {
  pub fn new(platform: Platform) -> Self {
    MemoryStatement {
      platform,
      calls: Vec::new(),
      params: BTreeMap::new(),
      pending: BTreeMap::new(),
      expected_len: None,
      reject: None,
      rows: VecDeque::new(),
    }
  }
  pub fn chunks(&self) -> Vec<(LobPiece, usize)> {
    self.calls.iter().filter_map(|c| match *c {
      Call::Chunk(_, piece, len) => Some((piece, len)),
      _ => None,
    }).collect()
  }
  /// Порции, переданные для указанного параметра.
  pub fn chunks_of(&self, index: &str) -> Vec<(LobPiece, usize)> {
    self.calls.iter().filter_map(|c| match *c {
      Call::Chunk(ref i, piece, len) if i == index => Some((piece, len)),
      _ => None,
    }).collect()
  }
  pub fn lob(&self, index: &str) -> Option<Bytes> {
    match self.params.get(index) {
      Some(Param::Lob(data)) => data.clone(),
      other => panic!("parameter {} is not a large object: {:?}", index, other),
    }
  }
  fn check(&self) -> DbResult<()> {
    match self.reject {
      Some(ref info) => Err(DbError::Fault(info.clone())),
      None => Ok(()),
    }
  }
  fn store(&self, data: Option<Bytes>) -> Option<Bytes> {
    match data {
      Some(ref b) if b.is_empty() && self.platform.null_lob() == NullLob::Indistinct => None,
      other => other,
    }
  }
}
impl Statement for MemoryStatement {
  fn platform(&self) -> &Platform {
    &self.platform
  }
  fn bind_value(&mut self, index: BindIndex, value: BindValue) -> DbResult<()> {
    self.calls.push(Call::Value(index.to_string()));
    self.check()?;
    self.params.insert(index.to_string(), Param::Value(value));
    Ok(())
  }
  fn bind_lob(&mut self, index: BindIndex, logical: &str, value: BindValue) -> DbResult<()> {
    self.calls.push(Call::Lob(index.to_string(), logical.to_owned()));
    self.check()?;
    let data = match value {
      BindValue::Null => None,
      BindValue::Text(s) if logical == CLOB => Some(Bytes::from(self.platform.charset().encode(&s))),
      BindValue::Text(s) => Some(Bytes::from(s.into_bytes())),
      BindValue::Bytes(b) => Some(b),
      other => return Err(DbError::Fault(Info::new(932, format!("inconsistent datatypes: {:?}", other)))),
    };
    let data = self.store(data);
    self.params.insert(index.to_string(), Param::Lob(data));
    Ok(())
  }
  fn append_lob_chunk(&mut self, index: BindIndex, piece: LobPiece, chunk: &[u8]) -> DbResult<()> {
    self.calls.push(Call::Chunk(index.to_string(), piece, chunk.len()));
    self.check()?;
    let pending = self.pending.entry(index.to_string()).or_default();
    if piece == LobPiece::First {
      pending.clear();
    }
    pending.extend_from_slice(chunk);
    Ok(())
  }
  fn finalize_lob(&mut self, index: BindIndex, logical: &str) -> DbResult<()> {
    self.calls.push(Call::Finalize(index.to_string(), logical.to_owned()));
    self.check()?;
    let data = self.pending.remove(&index.to_string()).unwrap_or_default();
    if let Some(expected) = self.expected_len {
      if (data.len() as u64) < expected {
        return Err(DbError::NeedData);
      }
    }
    let data = self.store(Some(Bytes::from(data)));
    self.params.insert(index.to_string(), Param::Lob(data));
    Ok(())
  }
  fn abort_lob(&mut self, index: BindIndex) -> DbResult<()> {
    self.calls.push(Call::Abort(index.to_string()));
    self.pending.remove(&index.to_string());
    Ok(())
  }
  fn fetch_row(&mut self) -> DbResult<Option<Row>> {
    self.calls.push(Call::Fetch);
    Ok(self.rows.pop_front())
  }
}

//-------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Default)]
struct Record {
  clob: Option<Bytes>,
  blob: Option<Bytes>,
}

/// Таблица `blob_table` в памяти.
#[derive(Debug)]
pub struct MemoryDb {
  pub platform: Platform,
  pub mode: CellMode,
  rows: BTreeMap<i64, Record>,
}
impl MemoryDb {
  pub fn new(platform: Platform, mode: CellMode) -> Self {
    MemoryDb { platform, mode, rows: BTreeMap::new() }
  }
  pub fn len(&self) -> usize {
    self.rows.len()
  }
  /// Новое выражение для связывания параметров.
  pub fn prepare(&self) -> MemoryStatement {
    MemoryStatement::new(self.platform.clone())
  }
  /// `insert into blob_table (id, clobfield, blobfield) values (?, ?, ?)`
  pub fn insert(&mut self, stmt: &MemoryStatement) -> usize {
    let id = id(stmt, "#0");
    let record = Record { clob: stmt.lob("#1"), blob: stmt.lob("#2") };
    self.rows.insert(id, record);
    1
  }
  /// `update blob_table set clobfield = ?, blobfield = ? where id = ?`
  pub fn update(&mut self, stmt: &MemoryStatement) -> usize {
    let id = id(stmt, "#2");
    let (clob, blob) = (stmt.lob("#0"), stmt.lob("#1"));
    match self.rows.get_mut(&id) {
      Some(record) => {
        record.clob = clob;
        record.blob = blob;
        1
      },
      None => 0,
    }
  }
  /// `select * from blob_table`
  pub fn select(&self) -> MemoryStatement {
    let mut stmt = self.prepare();
    for (id, record) in &self.rows {
      let mut row = Row::new();
      row.push("ID", RawCell::Inline(Bytes::from(id.to_string())));
      row.push("CLOBFIELD", self.cell(&record.clob, true));
      row.push("BLOBFIELD", self.cell(&record.blob, false));
      stmt.rows.push_back(row);
    }
    stmt
  }
  fn cell(&self, data: &Option<Bytes>, text: bool) -> RawCell {
    let data = match *data {
      Some(ref data) => data.clone(),
      None => return RawCell::Null,
    };
    match self.mode {
      CellMode::Inline => RawCell::Inline(data),
      CellMode::Locator => RawCell::locator(MemoryLocator(data)),
      CellMode::Text if text => match self.platform.charset().decode(&data) {
        Ok(s) => RawCell::Text(s),
        Err(e) => panic!("stored CLOB is not valid text: {}", e),
      },
      CellMode::Text => RawCell::Inline(data),
    }
  }
}

fn id(stmt: &MemoryStatement, index: &str) -> i64 {
  match stmt.params.get(index) {
    Some(Param::Value(BindValue::Int(id))) => *id,
    other => panic!("parameter {} is not an integer: {:?}", index, other),
  }
}

/// Поток, который выдает данные маленькими порциями, с прерываниями.
pub struct Trickle {
  data: Vec<u8>,
  pos: usize,
  step: usize,
  interrupt: bool,
}
impl Trickle {
  pub fn new(data: Vec<u8>, step: usize) -> Self {
    Trickle { data, pos: 0, step, interrupt: true }
  }
}
impl io::Read for Trickle {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    self.interrupt = !self.interrupt;
    if self.interrupt {
      return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
    }
    let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
    buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
    self.pos += n;
    Ok(n)
  }
}

/// Поток, который отдает указанное количество байт, а затем завершается ошибкой.
pub struct Failing {
  left: usize,
}
impl Failing {
  pub fn after(left: usize) -> Self {
    Failing { left }
  }
}
impl io::Read for Failing {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    if self.left == 0 {
      return Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream closed"));
    }
    let n = self.left.min(buf.len());
    buf[..n].fill(b'x');
    self.left -= n;
    Ok(n)
  }
}
