pub mod browser;
pub mod cli;

/// Fragment half of the address bar plus its history.
///
/// `push_fragment` must not fire the registered callbacks; they report
/// external navigation only (back/forward buttons, manual address edits).
pub trait Navigation {
    /// Fragment of the current address, without the leading `#`.
    /// `None` when the address has no fragment or an empty one.
    fn current_fragment(&self) -> Option<String>;

    /// Pushes a new history entry whose address carries `fragment`
    /// (or no fragment at all for `None`).
    fn push_fragment(&self, fragment: Option<&str>);

    /// Registers `callback` for externally caused fragment changes.
    fn on_fragment_change(&self, callback: Box<dyn FnMut(Option<String>)>);
}

/// Runs an action once, `delay_ms` milliseconds from now.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, action: Box<dyn FnOnce()>);
}

/// Puts text on the system clipboard.
pub trait ClipboardWriter {
    fn write_text(&self, text: &str);
}
