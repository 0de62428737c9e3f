//! Потоковая загрузка больших объектов в базу порциями ограниченного размера.
use std::io::{self, Read};
use std::num::NonZeroUsize;

use crate::Result;
use crate::error::{DbError, Error};
use crate::stmt::{BindIndex, Statement};

use super::LobStream;

/// Положение порции данных в последовательности порций, передаваемых драйверу.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LobPiece {
  /// Передаваемый буфер является первой частью набора буферов для записи.
  First,
  /// Передаваемый буфер является не первой частью набора буферов для записи. Окончание набора
  /// сообщается драйверу отдельным вызовом [`finalize_lob`](../stmt/trait.Statement.html#tymethod.finalize_lob).
  Next,
}

/// Итог потоковой загрузки.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Uploaded {
  /// Количество порций, переданных драйверу.
  pub chunks: usize,
  /// Общее количество переданных байт.
  pub bytes: u64,
}

/// Читает поток порциями не более `chunk_size` байт и передает каждую непустую порцию драйверу
/// в том порядке, в котором она прочитана, до тех пор, пока поток не сообщит о своем окончании
/// (чтение вернет 0 байт). Затем сообщает драйверу, что параметр загружен полностью.
///
/// Поток поглощается: повторно прочитать его невозможно.
///
/// # Ошибки
/// - [`SourceReadFailure`]: чтение потока завершилось ошибкой. Загрузка прерывается, выражение
///   выполнять нельзя.
/// - [`SourceExhausted`]: при завершении загрузки драйвер сообщил, что ему нужно больше данных.
/// - [`BackendRejected`]: драйвер вернул ошибку при дозаписи или завершении загрузки.
///
/// При любой ошибке незавершенная загрузка отменяется вызовом [`abort_lob`](../stmt/trait.Statement.html#method.abort_lob).
///
/// [`SourceReadFailure`]: ../error/enum.Error.html#variant.SourceReadFailure
/// [`SourceExhausted`]: ../error/enum.Error.html#variant.SourceExhausted
/// [`BackendRejected`]: ../error/enum.Error.html#variant.BackendRejected
pub fn upload<S>(stmt: &mut S, index: BindIndex, logical: &str, mut stream: LobStream, chunk_size: NonZeroUsize) -> Result<Uploaded>
  where S: Statement + ?Sized
{
  let mut buf = vec![0u8; chunk_size.get()];
  let mut piece = LobPiece::First;
  let mut uploaded = Uploaded::default();

  loop {
    let readed = match read_chunk(&mut stream, &mut buf) {
      Ok(0) => break,
      Ok(n) => n,
      Err(e) => {
        abort(stmt, index);
        return Err(Error::SourceReadFailure(e));
      },
    };
    if let Err(e) = stmt.append_lob_chunk(index, piece, &buf[..readed]) {
      abort(stmt, index);
      return Err(Error::BackendRejected(e));
    }
    tracing::trace!(index = %index, piece = ?piece, len = readed, "appended large object chunk");

    piece = LobPiece::Next;
    uploaded.chunks += 1;
    uploaded.bytes += readed as u64;
  }

  match stmt.finalize_lob(index, logical) {
    Ok(()) => {
      tracing::debug!(index = %index, logical, chunks = uploaded.chunks, bytes = uploaded.bytes, "large object uploaded");
      Ok(uploaded)
    },
    Err(DbError::NeedData) => {
      abort(stmt, index);
      Err(Error::SourceExhausted { index: index.to_string(), supplied: uploaded.bytes })
    },
    Err(e) => {
      abort(stmt, index);
      Err(Error::BackendRejected(e))
    },
  }
}

/// Читает очередную порцию. Прерванное сигналом чтение повторяется.
fn read_chunk(stream: &mut LobStream, buf: &mut [u8]) -> io::Result<usize> {
  loop {
    match stream.read(buf) {
      Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
      res => return res,
    }
  }
}

/// Отменяет незавершенную загрузку. Ошибка отмены только логируется: исходная ошибка важнее.
fn abort<S: Statement + ?Sized>(stmt: &mut S, index: BindIndex) {
  if let Err(e) = stmt.abort_lob(index) {
    tracing::warn!(index = %index, error = %e, "failed to abort large object upload");
  } else {
    tracing::warn!(index = %index, "large object upload aborted");
  }
}
