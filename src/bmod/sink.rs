//! The destination for decoded records.
//!
//! Persistence lives outside this crate; callers inject a [`RecordSink`].

use super::types::error::SinkError;
use super::types::models::Record;

/// Accepts decoded records one at a time, in source order.
///
/// A sink may batch or persist as it likes. An error is handed back to the
/// caller unchanged; the record is not retried.
pub trait RecordSink {
    fn accept(&mut self, record: Record) -> Result<(), SinkError>;
}

impl RecordSink for Vec<Record> {
    fn accept(&mut self, record: Record) -> Result<(), SinkError> {
        self.push(record);
        Ok(())
    }
}

/// Feeds `records` into `sink` until exhausted or the sink fails.
///
/// Returns the number of records accepted.
pub fn drain_into<I, S>(records: I, sink: &mut S) -> Result<usize, SinkError>
where
    I: IntoIterator<Item = Record>,
    S: RecordSink + ?Sized,
{
    let mut count = 0;
    for record in records {
        sink.accept(record)?;
        count += 1;
    }
    Ok(count)
}
