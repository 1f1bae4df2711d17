use std::cell::Cell;
use std::error::Error;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use zoon::{Mutable, Signal, SignalExt};

use crate::platform::{ClipboardWriter, Scheduler};

/// How long a copied block stays marked, in milliseconds.
pub const COPY_FEEDBACK_MS: u32 = 2_000;

/// Which side of a topic a code sample sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleKind {
    NoSql,
    Sql,
}

impl SampleKind {
    fn label(self) -> &'static str {
        match self {
            Self::NoSql => "nosql",
            Self::Sql => "sql",
        }
    }
}

/// Identifies one code sample block, like `sql-2` or `nosql-3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockId {
    pub kind: SampleKind,
    pub topic: usize,
}

impl BlockId {
    pub fn new(kind: SampleKind, topic: usize) -> Self {
        Self { kind, topic }
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.label(), self.topic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBlockIdError {
    input: String,
}

impl fmt::Display for ParseBlockIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} is not a block id like \"sql-2\" or \"nosql-3\"",
            self.input,
        )
    }
}

impl Error for ParseBlockIdError {}

impl FromStr for BlockId {
    type Err = ParseBlockIdError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let error = || ParseBlockIdError {
            input: input.to_owned(),
        };
        let (kind, topic) = input.rsplit_once('-').ok_or_else(error)?;
        let kind = match kind {
            "nosql" => SampleKind::NoSql,
            "sql" => SampleKind::Sql,
            _ => return Err(error()),
        };
        let topic = topic.parse().map_err(|_| error())?;
        Ok(Self { kind, topic })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CopyMark {
    block: BlockId,
    token: u64,
}

/// "Copied!" mark shared by every copy button; at most one block carries it.
///
/// Each copy takes a fresh token, and the scheduled clear only fires for
/// its own token, so a newer copy both supersedes the mark and restarts
/// the feedback window.
#[derive(Clone)]
pub struct CopyFeedback {
    mark: Mutable<Option<CopyMark>>,
    next_token: Rc<Cell<u64>>,
    clipboard: Rc<dyn ClipboardWriter>,
    scheduler: Rc<dyn Scheduler>,
}

impl CopyFeedback {
    pub fn new(clipboard: Rc<dyn ClipboardWriter>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            mark: Mutable::new(None),
            next_token: Rc::new(Cell::new(0)),
            clipboard,
            scheduler,
        }
    }

    /// Copies `text` and marks `block` for the next [`COPY_FEEDBACK_MS`].
    pub fn copy(&self, block: BlockId, text: &str) {
        self.clipboard.write_text(text);

        let token = self.next_token.get();
        self.next_token.set(token + 1);
        self.mark.set(Some(CopyMark { block, token }));

        self.scheduler.schedule(COPY_FEEDBACK_MS, {
            let mark = self.mark.clone();
            Box::new(move || {
                if mark.get().is_some_and(|current| current.token == token) {
                    mark.set(None);
                }
            })
        });
    }

    pub fn marked_block(&self) -> Option<BlockId> {
        self.mark.get().map(|mark| mark.block)
    }

    pub fn is_marked_signal(&self, block: BlockId) -> impl Signal<Item = bool> + use<> {
        self.mark
            .signal()
            .map(move |mark| mark.is_some_and(|mark| mark.block == block))
    }
}
