#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    NextPage,
    PrevPage,
    /// One discrete wheel tick; only the sign of the delta matters.
    Wheel { delta: f32 },
    /// Manual line scrolling of the viewport.
    ScrollBy { rows: i32 },
    SaveCopy,
    ToggleStatus,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    NextPage,
    PrevPage,
    Wheel,
    Scroll,
    SaveCopy,
    ToggleStatus,
    Quit,
    Load,
    RenderPage,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NextPage => "next-page",
            Self::PrevPage => "prev-page",
            Self::Wheel => "wheel",
            Self::Scroll => "scroll",
            Self::SaveCopy => "save-copy",
            Self::ToggleStatus => "toggle-status",
            Self::Quit => "quit",
            Self::Load => "load",
            Self::RenderPage => "render-page",
        }
    }
}

impl Command {
    pub fn action_id(&self) -> ActionId {
        match self {
            Self::NextPage => ActionId::NextPage,
            Self::PrevPage => ActionId::PrevPage,
            Self::Wheel { .. } => ActionId::Wheel,
            Self::ScrollBy { .. } => ActionId::Scroll,
            Self::SaveCopy => ActionId::SaveCopy,
            Self::ToggleStatus => ActionId::ToggleStatus,
            Self::Quit => ActionId::Quit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
    QuitRequested,
}
