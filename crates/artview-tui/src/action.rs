/// User intents produced by [`crate::input::map_event`] and consumed by
/// `App::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Tick,
    Resize(u16, u16),

    // Row cursor
    MoveUp,
    MoveDown,
    ClickAt(u16, u16),

    // Paging
    PrevPage,
    NextPage,
    FirstPage,
    LastPage,
    Reload,

    // Selection
    ToggleRow,
    ToggleAllOnPage,
    ClearSelection,
    OpenBulkPanel,

    // Display sort of the visible page
    CycleSort,
    ReverseSortDirection,

    // Text input (bulk count)
    InputChar(char),
    InputBackspace,
    InputConfirm,
    InputCancel,
    ToggleBulkMode,

    ToggleHelp,
    NavigateBack,
}
