/// Events raised off the UI thread by background services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    ConfigReload,
}
