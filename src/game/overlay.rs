//! Transient on-screen layers: save banners, view fades, debug text.

pub const NOTIFICATION_MILLIS: u64 = 2000;
pub const FADE_MILLIS: u64 = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Saved,
    SaveFailed,
}

impl NotificationKind {
    pub fn text(self) -> &'static str {
        match self {
            NotificationKind::Saved => "Game Saved!",
            NotificationKind::SaveFailed => "Save Failed!",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Notifications {
    current: Option<(NotificationKind, u64)>,
}

impl Notifications {
    pub fn show(&mut self, kind: NotificationKind, now_ms: u64) {
        self.current = Some((kind, now_ms));
    }

    /// The banner to draw at `now_ms`, if one is still live.
    pub fn active(&self, now_ms: u64) -> Option<NotificationKind> {
        let (kind, shown_at) = self.current?;
        (now_ms.saturating_sub(shown_at) < NOTIFICATION_MILLIS).then_some(kind)
    }
}

/// Black fade laid over the new view after a scene change.
#[derive(Clone, Debug, Default)]
pub struct Fade {
    started_at: Option<u64>,
}

impl Fade {
    pub fn start(&mut self, now_ms: u64) {
        self.started_at = Some(now_ms);
    }

    /// Overlay alpha at `now_ms`; `None` once the fade has finished.
    pub fn alpha(&mut self, now_ms: u64) -> Option<u8> {
        let start = self.started_at?;
        let progress = now_ms.saturating_sub(start) as f64 / FADE_MILLIS as f64;
        if progress >= 1.0 {
            self.started_at = None;
            return None;
        }
        Some((255.0 * (1.0 - progress)) as u8)
    }
}

/// Per-frame debug lines. Owned by the game rather than held globally.
#[derive(Clone, Debug, Default)]
pub struct DebugOverlay {
    enabled: bool,
    lines: Vec<String>,
}

impl DebugOverlay {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            lines: Vec::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        if !self.enabled {
            self.lines.clear();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn add(&mut self, line: impl Into<String>) {
        if self.enabled {
            self.lines.push(line.into());
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
