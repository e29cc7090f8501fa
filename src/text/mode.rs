//! Content modes: whether output has begun, and whether content is
//! preformatted or suppressed.

/// Effective mode, derived from [`ContentMode`]. Ignoring always wins over
/// preformatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentState {
    StartingNormal,
    StartingPre,
    StartingIgnoring,
    WritingNormal,
    WritingPre,
    WritingIgnoring,
}

impl ContentState {
    pub fn is_starting(self) -> bool {
        matches!(
            self,
            ContentState::StartingNormal | ContentState::StartingPre | ContentState::StartingIgnoring
        )
    }

    pub fn is_ignoring(self) -> bool {
        matches!(
            self,
            ContentState::StartingIgnoring | ContentState::WritingIgnoring
        )
    }

    pub fn is_pre(self) -> bool {
        matches!(self, ContentState::StartingPre | ContentState::WritingPre)
    }
}

/// The three mode flags.
///
/// The pre flag is left alone while ignoring, so leaving an ignored
/// element restores whatever mode surrounded it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentMode {
    started: bool,
    in_pre: bool,
    ignoring: bool,
}

impl ContentMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that output has been written. There is no way back.
    pub fn mark_writing(&mut self) {
        self.started = true;
    }

    /// Enter preformatted mode. Returns whether the mode changed; the caller
    /// should only call [`exit_pre`](Self::exit_pre) for an entry that did.
    pub fn enter_pre(&mut self) -> bool {
        if self.in_pre || self.ignoring {
            return false;
        }
        self.in_pre = true;
        true
    }

    pub fn exit_pre(&mut self) {
        if self.in_pre && !self.ignoring {
            self.in_pre = false;
        }
    }

    /// Start suppressing content. Returns whether the mode changed.
    pub fn enter_ignoring(&mut self) -> bool {
        if self.ignoring {
            return false;
        }
        self.ignoring = true;
        true
    }

    pub fn exit_ignoring(&mut self) {
        self.ignoring = false;
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn in_pre(&self) -> bool {
        self.in_pre
    }

    pub fn ignoring(&self) -> bool {
        self.ignoring
    }

    pub fn state(&self) -> ContentState {
        match (self.started, self.ignoring, self.in_pre) {
            (false, true, _) => ContentState::StartingIgnoring,
            (false, false, true) => ContentState::StartingPre,
            (false, false, false) => ContentState::StartingNormal,
            (true, true, _) => ContentState::WritingIgnoring,
            (true, false, true) => ContentState::WritingPre,
            (true, false, false) => ContentState::WritingNormal,
        }
    }
}
