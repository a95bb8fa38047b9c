//! Error callback installed on every context.
//!
//! Z3 invokes the handler from inside its own call stack, so the handler must
//! not unwind and must not call back into Z3 (not even `Z3_get_error_msg`).
//! It only pushes `(context, code)` into a bounded lock-free journal and emits
//! a log event. The authoritative error report is still the post-call check in
//! [`crate::library::Z3Library`].

use std::ffi::c_int;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

use crossbeam_queue::ArrayQueue;

use crate::error::ErrorCode;
use crate::handles::{NativeHandle, Z3Context};

/// How many callback records are kept before the oldest are overwritten.
pub const JOURNAL_CAPACITY: usize = 256;

/// One invocation of the native error callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeErrorRecord {
    /// Address of the context the error was raised on.
    pub context: usize,
    pub code: ErrorCode,
}

impl NativeErrorRecord {
    /// Whether this record belongs to `ctx`.
    pub fn is_for(&self, ctx: Z3Context) -> bool {
        self.context == ctx.as_ptr() as usize
    }
}

fn journal() -> &'static ArrayQueue<NativeErrorRecord> {
    static JOURNAL: OnceLock<ArrayQueue<NativeErrorRecord>> = OnceLock::new();
    JOURNAL.get_or_init(|| ArrayQueue::new(JOURNAL_CAPACITY))
}

/// Allocate the journal up front so the callback never has to.
pub(crate) fn prepare() {
    journal();
}

/// The callback registered through `Z3_set_error_handler`.
pub(crate) extern "C" fn on_native_error(ctx: Z3Context, code: c_int) {
    let _ = panic::catch_unwind(AssertUnwindSafe(|| {
        let record = NativeErrorRecord {
            context: ctx.as_ptr() as usize,
            code: ErrorCode::from_raw(code),
        };
        journal().force_push(record);
        tracing::warn!("Z3 error callback: context {:#x}, code {}", record.context, record.code);
    }));
}

/// Take every record collected so far, oldest first.
pub fn drain_native_errors() -> Vec<NativeErrorRecord> {
    let journal = journal();
    let mut records = Vec::with_capacity(journal.len());
    while let Some(record) = journal.pop() {
        records.push(record);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::c_void;

    #[test]
    #[serial_test::serial(guard_journal)]
    fn callback_records_without_native_calls() {
        prepare();
        let mut slot = 0u8;
        let ctx = Z3Context::from_raw((&mut slot as *mut u8).cast::<c_void>());

        on_native_error(ctx, 3);
        on_native_error(ctx, 99);

        let mine: Vec<_> = drain_native_errors()
            .into_iter()
            .filter(|r| r.is_for(ctx))
            .collect();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].code, ErrorCode::InvalidArgument);
        assert_eq!(mine[1].code, ErrorCode::Unknown(99));
    }

    #[test]
    #[serial_test::serial(guard_journal)]
    fn journal_is_bounded() {
        prepare();
        let mut slot = 0u8;
        let ctx = Z3Context::from_raw((&mut slot as *mut u8).cast::<c_void>());
        for _ in 0..JOURNAL_CAPACITY + 10 {
            on_native_error(ctx, 1);
        }
        assert!(drain_native_errors().len() <= JOURNAL_CAPACITY);
    }
}
