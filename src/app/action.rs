/// Side effects requested by the event handler, carried out by the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PressButton,
    Quit,
}
